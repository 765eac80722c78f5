use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::db::Database;
use crate::models::{BillingCycle, Subscription};
use crate::report;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args.get(1).map(String::as_str) {
        None | Some("summary") | Some("s") => cli_summary(db),
        Some("add") => cli_add(&args[2..], db),
        Some("list") | Some("ls") => cli_list(db),
        Some("edit") => cli_edit(&args[2..], db),
        Some("remove") | Some("rm") => cli_remove(&args[2..], db),
        Some("due") => cli_due(&args[2..], db),
        Some("--help") | Some("-h") | Some("help") => {
            print_usage();
            Ok(())
        }
        Some("--version") | Some("-V") | Some("version") => {
            println!("subtrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(other) => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    let cadences = BillingCycle::all()
        .iter()
        .map(|c| c.as_str().to_lowercase())
        .collect::<Vec<_>>()
        .join(" | ");

    println!("SubTrack — local-only subscription and bill tracker");
    println!();
    println!("Usage: subtrack [command]");
    println!();
    println!("Commands:");
    println!("  (none), summary               Per-category spending breakdown");
    println!("  add <name> <amount> <due>     Add a subscription (due: YYYY-MM-DD)");
    println!("    --category <name>           Category group");
    println!("    --cycle <cadence>           {cadences}");
    println!("    --currency <code>           Currency code (default: USD)");
    println!("    --notes <text>              Free-text notes");
    println!("  list                          List all subscriptions");
    println!("  edit <id> [flags]             Update fields (same flags as add, plus");
    println!("    --name <name> --amount <n> --due <date>; --category - clears it)");
    println!("  remove <id>                   Delete a subscription");
    println!("  due [days]                    Bills due within N days (default: 7)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_amount(s: &str) -> Result<Decimal> {
    let amount =
        Decimal::from_str(s).with_context(|| format!("Invalid amount: {s}"))?;
    if amount < Decimal::ZERO {
        anyhow::bail!("Amount must be non-negative: {s}");
    }
    Ok(amount)
}

fn parse_date(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {s}"))?;
    Ok(s.to_string())
}

fn parse_id(s: &str) -> Result<i64> {
    s.parse().with_context(|| format!("Invalid ID: {s}"))
}

// ── Commands ─────────────────────────────────────────────────

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    let (name, amount, due) = match args {
        [name, amount, due, ..] => (name.clone(), parse_amount(amount)?, parse_date(due)?),
        _ => anyhow::bail!("Usage: subtrack add <name> <amount> <next-due> [flags]"),
    };

    let mut sub = Subscription::new(name, amount, due);
    if let Some(category) = flag_value(args, "--category") {
        sub.category = Some(category.to_string());
    }
    if let Some(cycle) = flag_value(args, "--cycle") {
        sub.cycle = BillingCycle::parse(cycle);
    }
    if let Some(currency) = flag_value(args, "--currency") {
        sub.currency = currency.to_uppercase();
    }
    if let Some(notes) = flag_value(args, "--notes") {
        sub.notes = notes.to_string();
    }

    let id = db.insert_subscription(&sub)?;
    println!(
        "Added [{id}] {} — {} {} ({}, next due {})",
        sub.name, sub.amount, sub.currency, sub.cycle, sub.next_due
    );
    Ok(())
}

fn cli_list(db: &mut Database) -> Result<()> {
    let subs = db.get_subscriptions()?;
    if subs.is_empty() {
        println!("No subscriptions. Add one with: subtrack add <name> <amount> <next-due>");
        return Ok(());
    }

    println!(
        "{:<4} {:<24} {:>10} {:<4} {:<10} {:<11} Category",
        "ID", "Name", "Amount", "Cur", "Cycle", "Next Due"
    );
    println!("{}", "─".repeat(78));
    for sub in &subs {
        println!(
            "{:<4} {:<24} {:>10.2} {:<4} {:<10} {:<11} {}",
            sub.id.unwrap_or(0),
            sub.name,
            sub.amount,
            sub.currency,
            sub.cycle,
            sub.next_due,
            sub.category_label(),
        );
    }
    Ok(())
}

fn cli_edit(args: &[String], db: &mut Database) -> Result<()> {
    let id = match args.first() {
        Some(s) => parse_id(s)?,
        None => anyhow::bail!("Usage: subtrack edit <id> [flags]"),
    };

    let mut sub = db
        .get_subscription_by_id(id)?
        .ok_or_else(|| anyhow::anyhow!("No subscription with ID {id}"))?;

    let mut changed = false;
    if let Some(name) = flag_value(args, "--name") {
        sub.name = name.to_string();
        changed = true;
    }
    if let Some(amount) = flag_value(args, "--amount") {
        sub.amount = parse_amount(amount)?;
        changed = true;
    }
    if let Some(category) = flag_value(args, "--category") {
        // "-" clears the category, dropping the record back to Uncategorized
        sub.category = if category == "-" {
            None
        } else {
            Some(category.to_string())
        };
        changed = true;
    }
    if let Some(cycle) = flag_value(args, "--cycle") {
        sub.cycle = BillingCycle::parse(cycle);
        changed = true;
    }
    if let Some(due) = flag_value(args, "--due") {
        sub.next_due = parse_date(due)?;
        changed = true;
    }
    if let Some(currency) = flag_value(args, "--currency") {
        sub.currency = currency.to_uppercase();
        changed = true;
    }
    if let Some(notes) = flag_value(args, "--notes") {
        sub.notes = notes.to_string();
        changed = true;
    }

    if !changed {
        anyhow::bail!("Nothing to change. See: subtrack --help");
    }

    db.update_subscription(&sub)?;
    println!("Updated [{id}] {}", sub.name);
    Ok(())
}

fn cli_remove(args: &[String], db: &mut Database) -> Result<()> {
    let id = match args.first() {
        Some(s) => parse_id(s)?,
        None => anyhow::bail!("Usage: subtrack remove <id>"),
    };

    let sub = db
        .get_subscription_by_id(id)?
        .ok_or_else(|| anyhow::anyhow!("No subscription with ID {id}"))?;
    db.delete_subscription(id)?;
    println!("Removed [{id}] {}", sub.name);
    Ok(())
}

fn cli_summary(db: &mut Database) -> Result<()> {
    let count = db.get_subscription_count()?;
    let subs = db.get_subscriptions()?;
    let breakdown = report::category_breakdown(&subs);

    println!("SubTrack — {count} subscription(s)");
    println!("{}", "─".repeat(52));

    if breakdown.is_empty() {
        println!("  Nothing to chart yet.");
        return Ok(());
    }

    for slice in &breakdown {
        let bar_len = (slice.share / Decimal::TEN).round().to_usize().unwrap_or(0);
        println!(
            "  {:<20} {:>10.2}  {:>5.1}%  {}",
            slice.label,
            slice.total,
            slice.share,
            "█".repeat(bar_len),
        );
    }
    println!("{}", "─".repeat(52));
    println!("  {:<20} {:>10.2}", "Total", report::grand_total(&subs));
    Ok(())
}

fn cli_due(args: &[String], db: &mut Database) -> Result<()> {
    let days: u64 = match args.first().filter(|a| !a.starts_with('-')) {
        Some(s) => s.parse().with_context(|| format!("Invalid day count: {s}"))?,
        None => 7,
    };

    let cutoff = chrono::Local::now()
        .date_naive()
        .checked_add_days(chrono::Days::new(days))
        .ok_or_else(|| anyhow::anyhow!("Day count out of range: {days}"))?
        .format("%Y-%m-%d")
        .to_string();

    let due = db.get_due_by(&cutoff)?;
    if due.is_empty() {
        println!("Nothing due in the next {days} day(s)");
        return Ok(());
    }

    println!("Due by {cutoff}:");
    for sub in &due {
        println!(
            "  {:<11} {:<24} {:>10.2} {}",
            sub.next_due, sub.name, sub.amount, sub.currency
        );
    }
    Ok(())
}
