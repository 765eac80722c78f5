mod subscription;

pub use subscription::{BillingCycle, Subscription, UNCATEGORIZED};

#[cfg(test)]
mod tests;
