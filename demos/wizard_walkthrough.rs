//! Walks a three-step signup wizard the way a UI would drive it.
//!
//! Run with `RUST_LOG=stepwise=debug cargo run --example wizard_walkthrough`
//! to see the transition logs.

use serde_json::json;
use stepwise::controls::{Advance, StepForm, WizardNavigation};
use stepwise::{ObservableWizard, WizardConfig, WizardStore};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"{
    "steps": [
        { "id": "confirm", "order": 3, "nextLabel": "Create account" },
        { "id": "account", "order": 1 },
        { "id": "profile", "order": 2, "previousLabel": "Edit account" }
    ],
    "finishLabel": "Done"
}"#;

fn main() -> stepwise::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let wizard = ObservableWizard::new(WizardConfig::from_json(CONFIG)?)?;

    let _footer = wizard.subscribe(|snapshot| {
        let nav = &snapshot.navigation;
        println!(
            "[{}/{}] {:<8} back: {:<5} next: {:<5} ({})",
            nav.current_step_position,
            nav.total_steps,
            nav.current_step_id,
            nav.can_move_back,
            nav.can_move_next,
            nav.next_button_label,
        );
    });

    let nav = WizardNavigation::new(&wizard);

    // The account step starts incomplete.
    assert_eq!(nav.next(), Advance::Blocked);

    let account = StepForm::current(&wizard);
    account.set_field("email", json!("ada@example.com"));
    account.set_complete(true);
    nav.next();

    let profile = StepForm::current(&wizard);
    profile.set_field("name", json!("Ada Lovelace"));
    profile.set_complete(true);
    nav.next();

    // Jump back from a step indicator, then return.
    nav.go_to("account");
    nav.go_to("confirm");
    StepForm::current(&wizard).set_complete(true);

    match nav.next() {
        Advance::Completed(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        other => println!("wizard did not complete: {other:?}"),
    }

    wizard.reset();
    println!("after reset: {:?}", wizard.wizard_data());
    Ok(())
}
