pub mod prepare_env;

pub mod fake_gateway;
