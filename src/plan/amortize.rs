//! Single-month amortization arithmetic

/// Round a dollar amount to cents.
///
/// Applied after every arithmetic step so long schedules cannot accumulate
/// float drift; two runs with identical inputs reproduce identical output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Outcome of advancing one account's balance by one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizationStep {
    /// Interest accrued this month
    pub interest: f64,

    /// Payment applied to principal
    pub principal: f64,

    /// Post-payment balance
    pub new_balance: f64,

    /// Dollars actually drawn from the payment on the table
    pub payment_used: f64,
}

/// Advance a single balance by one month given the payment on the table.
///
/// If the payment covers the remaining balance plus accrued interest, the
/// debt retires this month and only the payoff amount is drawn; the account
/// must not receive further payment in later months of the run. A payment
/// below the accrued interest clamps principal to zero and grows the balance
/// (negative amortization); detecting that state is the simulator's job.
pub fn advance(balance: f64, annual_rate_pct: f64, payment_available: f64) -> AmortizationStep {
    let interest = round2(balance * annual_rate_pct / 100.0 / 12.0);
    let payoff = round2(balance + interest);

    if payment_available >= payoff {
        AmortizationStep {
            interest,
            principal: balance,
            new_balance: 0.0,
            payment_used: payoff,
        }
    } else {
        AmortizationStep {
            interest,
            principal: round2((payment_available - interest).max(0.0)),
            new_balance: round2(balance + interest - payment_available),
            payment_used: payment_available,
        }
    }
}
