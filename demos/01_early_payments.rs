/// early payments - compare the two strategies and a repeating payment
use loan_amortization_rs::{
    calculate, EarlyPayment, EarlyPaymentStrategy, LoanAmortization, LoanSpec, Money, Rate, RepeatingStrategy,
};
use rust_decimal_macros::dec;

fn summary(label: &str, schedule: &LoanAmortization) {
    println!(
        "{:<28} payments {:>2}  last payment {:>9}  interest {:>9}",
        label,
        schedule.term_months(),
        schedule.monthly_payments.last().map(|p| p.payment_amount).unwrap_or(Money::ZERO),
        schedule.overpayment_amount
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let loan = LoanSpec::new(Money::from_str_exact("500000.32")?, Rate::from_percentage(dec!(4.56)), 32);
    let extra = Money::from_major(50_000);

    summary("no early payments", &calculate(&loan)?);

    let shorter = loan
        .clone()
        .with_early_payment(5, EarlyPayment::single(extra, EarlyPaymentStrategy::DecreaseTerm));
    summary("decrease term at 5", &calculate(&shorter)?);

    let smaller = loan
        .clone()
        .with_early_payment(5, EarlyPayment::single(extra, EarlyPaymentStrategy::DecreaseMonthlyPayment));
    let schedule = calculate(&smaller)?;
    summary("decrease payment at 5", &schedule);
    if let Some(payment) = schedule.payment(6) {
        println!("  new level payment from month 6: {}", payment.payment_amount);
    }

    let repeating = loan.with_early_payment(
        5,
        EarlyPayment::new(
            extra,
            EarlyPaymentStrategy::DecreaseTerm,
            RepeatingStrategy::ToCertainMonth { repeat_to_month: 10 },
        ),
    );
    summary("repeat 5..10, decrease term", &calculate(&repeating)?);

    Ok(())
}
