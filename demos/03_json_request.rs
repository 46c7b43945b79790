/// json request - calculate straight from a wire request
use loan_amortization_rs::calculate_json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let request = r#"{
        "amount": "500000.32",
        "rate": "4.56",
        "term": 32,
        "firstPaymentDate": "2024-01-31",
        "earlyPayments": {
            "5": {
                "amount": "50000",
                "strategy": "decrease_term",
                "repeatingStrategy": "to_certain_month",
                "additionalParameters": { "repeat_to_month_number": "10" }
            }
        }
    }"#;

    println!("{}", calculate_json(request)?);

    // a null request fails verification
    if let Err(e) = calculate_json("null") {
        println!("{}", e);
    }

    Ok(())
}
