mod jwt;
mod v1;
