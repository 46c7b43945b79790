/// quick start - minimal example to get started
use loan_amortization_rs::{calculate, LoanSpec, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // 500,000.32 at 4.56% a year over 32 months
    let loan = LoanSpec::new(Money::from_str_exact("500000.32")?, Rate::from_percentage(dec!(4.56)), 32);
    let schedule = calculate(&loan)?;

    println!("monthly payment: {}", schedule.monthly_payment_amount);
    println!("total interest:  {}", schedule.overpayment_amount);

    for payment in &schedule.monthly_payments {
        println!(
            "{:>3} balance {:>10} principal {:>9} interest {:>8} payment {:>9}",
            payment.payment_number,
            payment.loan_balance,
            payment.principal_portion,
            payment.interest_portion,
            payment.payment_amount
        );
    }

    Ok(())
}
