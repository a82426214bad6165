//! Drives one generation call end to end and prints the outcome, the way
//! the studio UI would. Run with:
//!
//! ```sh
//! cargo run --example studio_demo
//! ```

use atelier::{
    history, CancelController, GenerationClient, GenerationOutcome, GenerationRequest,
    HistoryStore, ImageFormat, ImagePayload, LatencyRange, SimulatedModel, MAX_HISTORY,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Shorter latency window than the demo UI's 1.5–2.5s, so the example
    // finishes quickly even when it has to retry.
    let model = SimulatedModel::builder()
        .latency(LatencyRange::new(Duration::from_millis(300), Duration::from_millis(800))?)
        .build();
    let client = GenerationClient::builder().backend(model).build();
    let controller = CancelController::new();

    let image = ImagePayload::from_bytes(ImageFormat::Png, vec![0x89, 0x50, 0x4e, 0x47])?;
    let request =
        GenerationRequest::new(image, "portrait in late-afternoon light", "editorial")?;

    let store = HistoryStore::new(std::env::temp_dir().join("atelier-history.json"));
    let mut timeline = store.load().await;

    let token = controller.start_new_call();
    let outcome = GenerationOutcome::from(client.generate(&request, &token).await);

    match &outcome {
        GenerationOutcome::Success(result) => {
            println!("generated {} -> {}", result.id(), result.image_url());
            timeline = history::record_result(&timeline, result.clone(), MAX_HISTORY);
            store.save(&timeline).await;
            println!("history now holds {} of {} entries", timeline.len(), MAX_HISTORY);
        }
        GenerationOutcome::Cancelled => println!("generation stopped"),
        GenerationOutcome::Failed(err) => println!("generation failed: {err}"),
    }

    Ok(())
}
