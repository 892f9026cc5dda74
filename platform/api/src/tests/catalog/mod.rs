mod filter;
mod search;
