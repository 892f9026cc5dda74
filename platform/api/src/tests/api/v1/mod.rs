mod gql;
mod server;
