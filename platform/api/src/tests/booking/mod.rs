mod pricing;
mod schedule;
