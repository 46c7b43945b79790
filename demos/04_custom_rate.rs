/// custom rate - a per-month rate schedule instead of a fixed annual rate
use loan_amortization_rs::{CalculatorConfig, LoanAmortizationCalculator, LoanSpec, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // teaser rate for the first year, then a higher floating rate
    let step_up = |payment_number: u32| {
        if payment_number < 12 {
            Rate::from_decimal(dec!(0.0025))
        } else {
            Rate::from_decimal(dec!(0.0045))
        }
    };

    let loan = LoanSpec::with_provider_only(Money::from_major(200_000), 36, step_up);

    let config = CalculatorConfig {
        max_term_months: 360,
        ..CalculatorConfig::default()
    };
    let calculator = LoanAmortizationCalculator::with_config(config)?;
    let schedule = calculator.calculate(&loan)?;

    for payment in &schedule.monthly_payments {
        println!(
            "{:>3} interest {:>8} payment {:>9}",
            payment.payment_number, payment.interest_portion, payment.payment_amount
        );
    }
    println!("total interest: {}", schedule.overpayment_amount);

    Ok(())
}
