//! `strack send` command: drive one simulated report send.

use anyhow::Result;

use socialtrack_core::send::{SendStatus, check_send_allowed, run_simulated_send};
use socialtrack_store::MonthStore;

/// Run the send command.
///
/// An unsigned report is an ordinary decision path: the command prints the
/// precondition message and exits cleanly.
pub async fn run_send(store: &MonthStore) -> Result<()> {
    let month = store.load();

    if check_send_allowed(&month).is_err() {
        println!("The client must sign the report before it can be sent.");
        println!("Run `strack sign <image>` first.");
        return Ok(());
    }

    println!("Sending report for {}...", month.month_name);
    run_simulated_send(&month, |status| match status {
        SendStatus::Sending => {}
        SendStatus::Sent => println!("Report sent."),
        SendStatus::Idle => println!("Done."),
    })
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialtrack_core::catalog::PlanId;
    use socialtrack_core::month::Command;
    use socialtrack_test_utils::{month_with_plan, temp_store};

    #[tokio::test]
    async fn unsigned_send_exits_cleanly() {
        let fixture = temp_store();
        fixture.store.save(&month_with_plan(PlanId::Basic)).unwrap();
        run_send(&fixture.store).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn signed_send_completes() {
        let fixture = temp_store();
        let mut month = month_with_plan(PlanId::Basic);
        month.apply(Command::Sign("payload".into())).unwrap();
        fixture.store.save(&month).unwrap();
        run_send(&fixture.store).await.unwrap();
    }
}
