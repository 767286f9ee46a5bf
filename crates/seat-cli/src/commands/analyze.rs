use anyhow::Context;
use seat_client::{DetectorClient, ImagePayload};
use seat_core::entities::{Calibration, ImagePoint};
use seat_core::enums::CalibrationMode;
use seat_store::FloorPlanSession;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::commands::load_config;
use crate::output::output;
use crate::progress::Progress;

/// `AUTO` without anchors, `MANUAL` with whatever was given; the request
/// contract rejects anything but four.
#[must_use]
pub fn calibration_from(anchors: &[ImagePoint]) -> Calibration {
    if anchors.is_empty() {
        Calibration::auto()
    } else {
        Calibration {
            mode: CalibrationMode::Manual,
            anchors: Some(anchors.to_vec()),
        }
    }
}

/// Handle `seat analyze`.
pub async fn handle(args: &AnalyzeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = load_config(flags)?;
    let detector = config.require_detector()?;
    let client = DetectorClient::from_config(detector)?;
    let image = ImagePayload::from_path(&args.image)
        .await
        .with_context(|| format!("cannot upload {}", args.image.display()))?;

    let mut session =
        FloorPlanSession::with_layout(config.layout.plane(), config.layout.seat_rules());
    let ticket = session.begin_analysis()?;
    let request = ticket.request(calibration_from(&args.anchors));

    let progress = Progress::spinner("Analyzing floor plan...");
    let response = match client.analyze(&request, &image).await {
        Ok(response) => response,
        Err(error) => {
            session.fail_analysis(ticket);
            progress.finish_err("Analysis failed");
            tracing::warn!(%error, key = %ticket.idempotency_key, "detector call failed");
            return Err(error).context("floor-plan analysis failed");
        }
    };

    let run_id = session.complete_analysis(ticket, response)?;
    progress.finish_ok(&format!(
        "Detected {} entities (run {run_id})",
        session.entities().len()
    ));

    output(&session.snapshot(), flags.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_anchors_means_auto() {
        assert_eq!(calibration_from(&[]), Calibration::auto());
    }

    #[test]
    fn anchors_switch_to_manual() {
        let anchors = [
            ImagePoint::new(0.0, 0.0),
            ImagePoint::new(1.0, 0.0),
            ImagePoint::new(1.0, 1.0),
            ImagePoint::new(0.0, 1.0),
        ];
        assert_eq!(calibration_from(&anchors), Calibration::manual(anchors));
    }

    #[test]
    fn partial_anchors_fail_request_validation() {
        let calibration = calibration_from(&[ImagePoint::new(0.5, 0.5)]);
        let violations = calibration.semantic_violations("/calibration");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "/calibration/anchors");
    }
}
