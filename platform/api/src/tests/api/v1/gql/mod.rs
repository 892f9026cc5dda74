mod schema;
mod validators;
