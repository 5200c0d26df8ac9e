//! Ledger query layer - read-only analytics over expenses and credits.
//!
//! [`Ledger`] is an owned snapshot of the personal ledger, loaded once per
//! query and then interrogated through pure methods. Nothing here mutates
//! state or caches results; callers that want fresh numbers load a fresh
//! snapshot. Methods that depend on the clock take `now` as a parameter so
//! the arithmetic stays deterministic and testable.
//!
//! Period conventions are UTC: "today" is the current UTC date, "this week"
//! starts on Monday, "this month" on the 1st.

use crate::{
    core::{credit as credit_ops, expense as expense_ops},
    entities::{credit, expense},
    errors::Result,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

/// An owned snapshot of every expense and credit, newest first.
#[derive(Debug, Clone)]
pub struct Ledger {
    /// All personal expenses, newest first
    pub expenses: Vec<expense::Model>,
    /// All credits, newest first
    pub credits: Vec<credit::Model>,
}

/// One entry of the merged activity feed.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEntry {
    /// Money out
    Expense(expense::Model),
    /// Money in
    Credit(credit::Model),
}

impl LedgerEntry {
    /// When the entry occurred.
    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Self::Expense(e) => e.date,
            Self::Credit(c) => c.date,
        }
    }

    /// The entry's title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Expense(e) => &e.title,
            Self::Credit(c) => &c.title,
        }
    }

    /// The entry's amount with direction applied: credits positive,
    /// expenses negative.
    #[must_use]
    pub fn signed_amount(&self) -> f64 {
        match self {
            Self::Expense(e) => -e.amount,
            Self::Credit(c) => c.amount,
        }
    }
}

/// Spent/credited/net figures for one time window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodTotals {
    /// Sum of expense amounts in the window
    pub spent: f64,
    /// Sum of credit amounts in the window
    pub credited: f64,
    /// `credited - spent`
    pub net: f64,
}

/// Credited/spent/net figures for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Sum of credit amounts in the month
    pub credited: f64,
    /// Sum of expense amounts in the month
    pub spent: f64,
    /// `credited - spent`
    pub net: f64,
}

/// Money in and out on one day, for the cash-flow trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCashFlow {
    /// The UTC day
    pub date: NaiveDate,
    /// Sum of credit amounts on that day
    pub credited: f64,
    /// Sum of expense amounts on that day
    pub spent: f64,
}

impl Ledger {
    /// Loads a fresh snapshot of the whole personal ledger.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let expenses = expense_ops::get_all_expenses(db).await?;
        let credits = credit_ops::get_all_credits(db).await?;
        Ok(Self { expenses, credits })
    }

    /// Sum of all expense amounts.
    #[must_use]
    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Sum of all credit amounts.
    #[must_use]
    pub fn total_credits(&self) -> f64 {
        self.credits.iter().map(|c| c.amount).sum()
    }

    /// Overall net position: credits minus expenses.
    #[must_use]
    pub fn net_balance(&self) -> f64 {
        self.total_credits() - self.total_expenses()
    }

    /// Totals for the current UTC day.
    #[must_use]
    pub fn today_totals(&self, now: DateTime<Utc>) -> PeriodTotals {
        let today = now.date_naive();
        self.totals_where(|date| date.date_naive() == today)
    }

    /// Totals since the start of the current week (Monday, UTC).
    #[must_use]
    pub fn week_totals(&self, now: DateTime<Utc>) -> PeriodTotals {
        let week_start = now.date_naive().week(Weekday::Mon).first_day();
        self.totals_where(|date| date.date_naive() >= week_start)
    }

    /// Totals since the first of the current month (UTC).
    #[must_use]
    pub fn month_totals(&self, now: DateTime<Utc>) -> PeriodTotals {
        let today = now.date_naive();
        let month_start = today.with_day(1).unwrap_or(today);
        self.totals_where(|date| date.date_naive() >= month_start)
    }

    fn totals_where<F>(&self, in_window: F) -> PeriodTotals
    where
        F: Fn(DateTime<Utc>) -> bool,
    {
        let spent = self
            .expenses
            .iter()
            .filter(|e| in_window(e.date))
            .map(|e| e.amount)
            .sum::<f64>();
        let credited = self
            .credits
            .iter()
            .filter(|c| in_window(c.date))
            .map(|c| c.amount)
            .sum::<f64>();
        PeriodTotals {
            spent,
            credited,
            net: credited - spent,
        }
    }

    /// Average spend per day since the oldest expense.
    ///
    /// The day count is clamped to at least 1, so a ledger whose history
    /// began today still reports a meaningful rate. 0 with no expenses.
    #[must_use]
    pub fn daily_spending_rate(&self, now: DateTime<Utc>) -> f64 {
        let Some(oldest) = self.oldest_expense_date() else {
            return 0.0;
        };
        let days = (now - oldest).num_days().max(1);
        #[allow(clippy::cast_precision_loss)]
        let days = days as f64;
        self.total_expenses() / days
    }

    /// Average spend per week since the oldest expense.
    #[must_use]
    pub fn weekly_spending_rate(&self, now: DateTime<Utc>) -> f64 {
        let Some(oldest) = self.oldest_expense_date() else {
            return 0.0;
        };
        let weeks = (now - oldest).num_weeks().max(1);
        #[allow(clippy::cast_precision_loss)]
        let weeks = weeks as f64;
        self.total_expenses() / weeks
    }

    /// Average spend per calendar month since the oldest expense.
    #[must_use]
    pub fn monthly_spending_rate(&self, now: DateTime<Utc>) -> f64 {
        let Some(oldest) = self.oldest_expense_date() else {
            return 0.0;
        };
        let months = month_diff(oldest, now).max(1);
        #[allow(clippy::cast_precision_loss)]
        let months = months as f64;
        self.total_expenses() / months
    }

    /// Days the current net balance lasts at the daily spending rate.
    ///
    /// 0 when the balance is non-positive or there is no spending history.
    #[must_use]
    pub fn burn_rate_days(&self, now: DateTime<Utc>) -> f64 {
        let net = self.net_balance();
        let daily = self.daily_spending_rate(now);
        if net > 0.0 && daily > 0.0 {
            net / daily
        } else {
            0.0
        }
    }

    /// Share of income kept, as a percentage. 0 when nothing was credited.
    #[must_use]
    pub fn savings_rate(&self) -> f64 {
        let credited = self.total_credits();
        if credited > 0.0 {
            (self.net_balance() / credited) * 100.0
        } else {
            0.0
        }
    }

    /// Percentage change in spending between the older and newer half of
    /// the expense history.
    ///
    /// Expenses are ordered by date; the first `n/2` form the older half and
    /// the last `n/2` the newer (the middle entry of an odd count belongs to
    /// neither). Positive means spending is accelerating. 0 with fewer than
    /// two expenses or an empty older half.
    #[must_use]
    pub fn spending_velocity(&self) -> f64 {
        if self.expenses.len() < 2 {
            return 0.0;
        }

        let mut sorted: Vec<&expense::Model> = self.expenses.iter().collect();
        sorted.sort_by(|a, b| a.date.cmp(&b.date));

        let half = sorted.len() / 2;
        let older: f64 = sorted[..half].iter().map(|e| e.amount).sum();
        let newer: f64 = sorted[sorted.len() - half..].iter().map(|e| e.amount).sum();

        if older > 0.0 {
            ((newer - older) / older) * 100.0
        } else {
            0.0
        }
    }

    /// Net balance projected `days` ahead at the current daily rate.
    #[must_use]
    pub fn projected_balance(&self, days: i64, now: DateTime<Utc>) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let days = days as f64;
        self.net_balance() - self.daily_spending_rate(now) * days
    }

    /// Composite financial health score in `[0, 100]`.
    ///
    /// Starts at 50 and adds points for a healthy savings rate (up to 30),
    /// a long runway (up to 25), decelerating spending (up to 20), and a
    /// positive net balance (up to 25, 5 points per 1000 held); rapid
    /// spending growth and a negative balance subtract.
    #[must_use]
    pub fn health_score(&self, now: DateTime<Utc>) -> f64 {
        let mut score: f64 = 50.0;

        let savings = self.savings_rate();
        if savings > 20.0 {
            score += 30.0;
        } else if savings > 10.0 {
            score += 20.0;
        } else if savings > 0.0 {
            score += 10.0;
        }

        let runway = self.burn_rate_days(now);
        if runway > 90.0 {
            score += 25.0;
        } else if runway > 60.0 {
            score += 15.0;
        } else if runway > 30.0 {
            score += 5.0;
        }

        let velocity = self.spending_velocity();
        if velocity < -10.0 {
            score += 20.0;
        } else if velocity < 0.0 {
            score += 10.0;
        } else if velocity > 20.0 {
            score -= 10.0;
        }

        let net = self.net_balance();
        if net > 0.0 {
            score += (net / 1000.0 * 5.0).min(25.0);
        } else {
            score -= 15.0;
        }

        score.clamp(0.0, 100.0)
    }

    /// Human-readable band for [`health_score`](Self::health_score).
    #[must_use]
    pub fn health_status(&self, now: DateTime<Utc>) -> &'static str {
        let score = self.health_score(now);
        if score >= 75.0 {
            "Excellent"
        } else if score >= 60.0 {
            "Good"
        } else if score >= 45.0 {
            "Fair"
        } else if score >= 30.0 {
            "Needs Attention"
        } else {
            "Critical"
        }
    }

    /// Total spent per expense category, largest first.
    ///
    /// Equal totals tie-break on category name so the ordering is stable.
    #[must_use]
    pub fn expenses_by_category(&self) -> Vec<(String, f64)> {
        group_totals(self.expenses.iter().map(|e| (e.category.as_str(), e.amount)))
    }

    /// Total credited per source, largest first.
    #[must_use]
    pub fn credits_by_source(&self) -> Vec<(String, f64)> {
        group_totals(self.credits.iter().map(|c| (c.source.as_str(), c.amount)))
    }

    /// Credited/spent/net per calendar month, oldest first.
    ///
    /// Only months with at least one entry appear.
    #[must_use]
    pub fn monthly_breakdown(&self) -> Vec<MonthlySummary> {
        let mut months: HashMap<(i32, u32), (f64, f64)> = HashMap::new();
        for expense in &self.expenses {
            let key = (expense.date.year(), expense.date.month());
            months.entry(key).or_insert((0.0, 0.0)).1 += expense.amount;
        }
        for credit in &self.credits {
            let key = (credit.date.year(), credit.date.month());
            months.entry(key).or_insert((0.0, 0.0)).0 += credit.amount;
        }

        let mut summaries: Vec<MonthlySummary> = months
            .into_iter()
            .map(|((year, month), (credited, spent))| MonthlySummary {
                year,
                month,
                credited,
                spent,
                net: credited - spent,
            })
            .collect();
        summaries.sort_by_key(|s| (s.year, s.month));
        summaries
    }

    /// Daily money in/out over the last 30 days, oldest first.
    ///
    /// Days without any entry are omitted rather than zero-filled.
    #[must_use]
    pub fn daily_cash_flow(&self, now: DateTime<Utc>) -> Vec<DailyCashFlow> {
        let cutoff = now - Duration::days(30);

        let mut days: HashMap<NaiveDate, (f64, f64)> = HashMap::new();
        for expense in self.expenses.iter().filter(|e| e.date >= cutoff) {
            days.entry(expense.date.date_naive()).or_insert((0.0, 0.0)).1 += expense.amount;
        }
        for credit in self.credits.iter().filter(|c| c.date >= cutoff) {
            days.entry(credit.date.date_naive()).or_insert((0.0, 0.0)).0 += credit.amount;
        }

        let mut flows: Vec<DailyCashFlow> = days
            .into_iter()
            .map(|(date, (credited, spent))| DailyCashFlow {
                date,
                credited,
                spent,
            })
            .collect();
        flows.sort_by_key(|f| f.date);
        flows
    }

    /// The newest `limit` entries across expenses and credits, merged into
    /// one feed, newest first.
    #[must_use]
    pub fn recent_activity(&self, limit: usize) -> Vec<LedgerEntry> {
        let mut feed: Vec<LedgerEntry> = self
            .expenses
            .iter()
            .cloned()
            .map(LedgerEntry::Expense)
            .chain(self.credits.iter().cloned().map(LedgerEntry::Credit))
            .collect();
        feed.sort_by(|a, b| b.date().cmp(&a.date()));
        feed.truncate(limit);
        feed
    }

    fn oldest_expense_date(&self) -> Option<DateTime<Utc>> {
        self.expenses.iter().map(|e| e.date).min()
    }
}

/// Whole calendar months between two instants, by year/month position.
fn month_diff(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let years = i64::from(to.year()) - i64::from(from.year());
    let months = i64::from(to.month()) - i64::from(from.month());
    years * 12 + months
}

fn group_totals<'a, I>(entries: I) -> Vec<(String, f64)>
where
    I: Iterator<Item = (&'a str, f64)>,
{
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for (name, amount) in entries {
        *totals.entry(name).or_insert(0.0) += amount;
    }

    let mut rows: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

/// Formats an amount with an explicit sign and currency symbol.
///
/// # Examples
/// `format_signed_amount(50.0)` is `"+$50.00"`, `format_signed_amount(-25.5)`
/// is `"-$25.50"`.
#[must_use]
pub fn format_signed_amount(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+${amount:.2}")
    } else {
        format!("-${:.2}", amount.abs())
    }
}
