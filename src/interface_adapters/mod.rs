// Interface adapters: tonic routing, health reporting and request tracing.

pub mod health;
pub mod registry;
pub mod trace;

#[cfg(test)]
pub(crate) mod test_support;
