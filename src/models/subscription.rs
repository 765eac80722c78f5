use rust_decimal::Decimal;

/// Label used for subscriptions without a category group.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "weekly" | "week" => Self::Weekly,
            "quarterly" | "quarter" => Self::Quarterly,
            "yearly" | "year" | "annual" | "annually" => Self::Yearly,
            _ => Self::Monthly,
        }
    }

    pub fn all() -> &'static [BillingCycle] {
        &[Self::Weekly, Self::Monthly, Self::Quarterly, Self::Yearly]
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: Option<i64>,
    pub name: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub cycle: BillingCycle,
    pub next_due: String,
    pub currency: String,
    pub icon: Option<String>,
    pub notes: String,
    pub created_at: String,
}

impl Subscription {
    pub fn new(name: String, amount: Decimal, next_due: String) -> Self {
        Self {
            id: None,
            name,
            amount,
            category: None,
            cycle: BillingCycle::Monthly,
            next_due,
            currency: "USD".to_string(),
            icon: None,
            notes: String::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Category group label, falling back to the placeholder when the
    /// record has no category or a blank one.
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }
}
