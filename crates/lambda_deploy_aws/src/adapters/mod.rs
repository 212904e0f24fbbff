pub mod aws;
pub mod lookup;
pub mod provider;
