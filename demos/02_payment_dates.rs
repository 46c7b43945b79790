/// payment dates - day-count interest and month-end dates
use loan_amortization_rs::chrono::NaiveDate;
use loan_amortization_rs::{calculate, LoanSpec, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let first_payment = NaiveDate::from_ymd_opt(2014, 7, 31).ok_or("invalid date")?;
    let loan = LoanSpec::new(Money::from_major(1_500_000), Rate::from_percentage(dec!(5.32)), 12)
        .with_first_payment_date(first_payment);

    let schedule = calculate(&loan)?;

    // interest for each payment accrues over the calendar month before it
    for payment in &schedule.monthly_payments {
        if let Some(date) = payment.payment_date {
            println!("{}  interest {:>8}  payment {:>10}", date, payment.interest_portion, payment.payment_amount);
        }
    }
    println!("total interest: {}", schedule.overpayment_amount);

    Ok(())
}
