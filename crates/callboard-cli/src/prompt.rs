//! Interactive prompts for the call form

use anyhow::{Context, Result};
use callboard::{CallForm, Workflow};
use dialoguer::{Input, Select};

/// Fill in any form field not already set, prompting on the terminal.
///
/// Empty answers are accepted here; the form's validation reports them.
pub fn fill_form(
    form: &mut CallForm,
    name: Option<String>,
    phone: Option<String>,
    workflow: Option<Workflow>,
) -> Result<()> {
    form.customer_name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("Customer name")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read customer name")?,
    };

    form.phone_number = match phone {
        Some(p) => p,
        None => Input::<String>::new()
            .with_prompt("Phone number")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read phone number")?,
    };

    form.workflow = match workflow {
        Some(w) => w,
        None => {
            let labels: Vec<&str> = Workflow::ALL.iter().map(|w| w.as_str()).collect();
            let current = Workflow::ALL
                .iter()
                .position(|w| *w == form.workflow)
                .unwrap_or(0);
            let index = Select::new()
                .with_prompt("Workflow")
                .items(&labels)
                .default(current)
                .interact()
                .context("Failed to read workflow")?;
            Workflow::ALL[index]
        }
    };

    Ok(())
}
