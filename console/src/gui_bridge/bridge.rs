use crate::gui_bridge::model::{DetectionSubmission, NotesUpdate, SummaryModel, ViewQuery};
use crate::workflow::runner::SharedRegistry;
use anyhow::Context;
use exocore::telemetry::{LogManager, MetricsRecorder};
use exocore::{DetectionId, PlanetRegistry, Stats};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, PoisonError, RwLockReadGuard, RwLockWriteGuard};
use warp::{http::StatusCode, Filter};

fn read(registry: &SharedRegistry) -> RwLockReadGuard<'_, PlanetRegistry> {
    registry.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(registry: &SharedRegistry) -> RwLockWriteGuard<'_, PlanetRegistry> {
    registry.write().unwrap_or_else(PoisonError::into_inner)
}

fn error_reply(message: &str, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
}

/// Read and annotate access to the registry for the rendering layer.
pub struct RegistryBridge {
    registry: SharedRegistry,
    metrics: Arc<MetricsRecorder>,
    logger: LogManager,
}

impl RegistryBridge {
    pub fn new(registry: SharedRegistry, metrics: Arc<MetricsRecorder>) -> Self {
        Self {
            registry,
            metrics,
            logger: LogManager::new("bridge"),
        }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        let registry = self.registry.clone();
        let registry_filter = warp::any().map(move || registry.clone());
        let metrics = self.metrics.clone();
        let metrics_filter = warp::any().map(move || metrics.clone());
        let logger = self.logger;

        let list_route = warp::path("planets")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<ViewQuery>())
            .and(registry_filter.clone())
            .map(|query: ViewQuery, registry: SharedRegistry| {
                let view = read(&registry).query_view(&query.to_filter(), query.sort);
                warp::reply::with_status(warp::reply::json(&view), StatusCode::OK)
            });

        let stats_route = warp::path("stats")
            .and(warp::path::end())
            .and(warp::get())
            .and(registry_filter.clone())
            .and(metrics_filter.clone())
            .map(|registry: SharedRegistry, metrics: Arc<MetricsRecorder>| {
                let summary = SummaryModel {
                    stats: read(&registry).aggregate(),
                    metrics: metrics.snapshot(),
                };
                warp::reply::with_status(warp::reply::json(&summary), StatusCode::OK)
            });

        let profile_route = warp::path!("planets" / String / "profile")
            .and(warp::get())
            .and(registry_filter.clone())
            .map(|id: String, registry: SharedRegistry| {
                let profile = id
                    .parse::<DetectionId>()
                    .ok()
                    .and_then(|id| read(&registry).profile(id));
                match profile {
                    Some(profile) => {
                        warp::reply::with_status(warp::reply::json(&profile), StatusCode::OK)
                    }
                    None => error_reply(&format!("no detection {id}"), StatusCode::NOT_FOUND),
                }
            });

        let notes_route = warp::path!("planets" / String / "notes")
            .and(warp::put())
            .and(warp::body::json())
            .and(registry_filter.clone())
            .and(metrics_filter.clone())
            .map(
                |id: String,
                 update: NotesUpdate,
                 registry: SharedRegistry,
                 metrics: Arc<MetricsRecorder>| {
                    // Stale ids from the viewer are expected; they update nothing.
                    let updated = match id.parse::<DetectionId>() {
                        Ok(id) => write(&registry).update_annotation(id, update.notes),
                        Err(_) => false,
                    };
                    if updated {
                        metrics.record_annotation();
                    }
                    warp::reply::with_status(
                        warp::reply::json(&json!({ "status": "ok", "updated": updated })),
                        StatusCode::OK,
                    )
                },
            );

        let submit_route = warp::path("detections")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(registry_filter)
            .and(metrics_filter)
            .map(
                move |submission: DetectionSubmission,
                      registry: SharedRegistry,
                      metrics: Arc<MetricsRecorder>| {
                    match submission.response.validate() {
                        Ok(prediction) => {
                            let mut guard = write(&registry);
                            let detection = guard.record_detection(submission.request, prediction);
                            metrics.record_detection();
                            warp::reply::with_status(
                                warp::reply::json(detection),
                                StatusCode::CREATED,
                            )
                        }
                        Err(err) => {
                            logger.warn(&format!("submission rejected: {}", err));
                            metrics.record_rejection();
                            error_reply(&err.to_string(), StatusCode::UNPROCESSABLE_ENTITY)
                        }
                    }
                },
            );

        list_route
            .or(stats_route)
            .or(profile_route)
            .or(notes_route)
            .or(submit_route)
    }

    /// Binds the routes and serves them on the current tokio runtime.
    pub fn spawn(&self, address: SocketAddr) -> anyhow::Result<SocketAddr> {
        let (bound, server) = warp::serve(self.routes())
            .try_bind_ephemeral(address)
            .with_context(|| format!("binding registry bridge to {address}"))?;
        tokio::spawn(server);
        Ok(bound)
    }

    /// Prints the current summary and returns it.
    pub fn publish(&self) -> Stats {
        let stats = read(&self.registry).aggregate();
        println!(
            "[BRIDGE] detections: {} (confirmed {}, candidate {}, false positive {}), avg confidence {:.1}%",
            stats.total,
            stats.confirmed_count,
            stats.candidate_count,
            stats.false_positive_count,
            stats.average_confidence_percent
        );
        stats
    }

    /// Prints the logbook view for `query`, one line per detection.
    pub fn publish_logbook(&self, query: &ViewQuery) {
        let view = read(&self.registry).query_view(&query.to_filter(), query.sort);
        for detection in &view {
            println!(
                "[BRIDGE] {:<10} {:<16} {:<22} {:>6.1}%  R={:.2} R⊕  P={:.1} d  Teq={:.0} K",
                detection.id.to_string(),
                detection.display_name,
                detection.classification.display_label(),
                detection.confidence * 100.0,
                detection.radius_earth,
                detection.orbital_period_days,
                detection.equilibrium_temp_k
            );
        }
    }

    pub fn publish_status(&self, message: &str) {
        println!("[BRIDGE] {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::presets::{build_request, Preset};
    use crate::workflow::classifier::HeuristicClassifier;
    use crate::workflow::runner::share;
    use exocore::classifier_interface::ModelSelection;
    use exocore::registry::{NameGenerator, PlanetProfile};
    use exocore::{Classification, Detection, FallbackDefaults};

    fn bridge_with(presets: &[Preset]) -> RegistryBridge {
        let mut registry =
            PlanetRegistry::with_config(FallbackDefaults::default(), NameGenerator::seeded(21));
        for &preset in presets {
            let request = build_request(preset, ModelSelection::default());
            let prediction = HeuristicClassifier.evaluate(&request).validate().unwrap();
            registry.record_detection(request, prediction);
        }
        RegistryBridge::new(share(registry), Arc::new(MetricsRecorder::new()))
    }

    #[tokio::test]
    async fn list_route_filters_and_sorts() {
        let bridge = bridge_with(&Preset::ALL);
        let response = warp::test::request()
            .method("GET")
            .path("/planets?classification=confirmed&sort=confidence")
            .reply(&bridge.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let view: Vec<Detection> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(view.len(), 2);
        assert!(view
            .iter()
            .all(|d| d.classification == Classification::Confirmed));
        assert!(view[0].confidence >= view[1].confidence);
    }

    #[tokio::test]
    async fn list_route_defaults_to_newest_first() {
        let bridge = bridge_with(&[Preset::Candidate, Preset::Confirmed]);
        let response = warp::test::request()
            .path("/planets")
            .reply(&bridge.routes())
            .await;
        let view: Vec<Detection> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(view[0].id.to_string(), "planet-2");
        assert_eq!(view[1].id.to_string(), "planet-1");
    }

    #[tokio::test]
    async fn stats_route_reports_aggregate() {
        let bridge = bridge_with(&[Preset::Confirmed, Preset::FalsePositive]);
        let response = warp::test::request()
            .path("/stats")
            .reply(&bridge.routes())
            .await;
        let summary: SummaryModel = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(summary.stats.total, 2);
        assert_eq!(summary.stats.false_positive_count, 1);
        assert_eq!(summary.stats, bridge.publish());
    }

    #[tokio::test]
    async fn notes_route_updates_and_tolerates_unknown_ids() {
        let bridge = bridge_with(&[Preset::Candidate]);
        let routes = bridge.routes();

        let response = warp::test::request()
            .method("PUT")
            .path("/planets/planet-1/notes")
            .json(&json!({ "notes": "schedule radial velocity" }))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read(&bridge.registry).detections()[0].annotation,
            "schedule radial velocity"
        );

        let response = warp::test::request()
            .method("PUT")
            .path("/planets/nonexistent-id/notes")
            .json(&json!({ "notes": "text" }))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["updated"], false);
        assert_eq!(bridge.metrics.snapshot().annotations, 1);
    }

    #[tokio::test]
    async fn profile_route_returns_404_for_unknown_id() {
        let bridge = bridge_with(&[Preset::HotJupiter]);
        let routes = bridge.routes();

        let response = warp::test::request()
            .path("/planets/planet-1/profile")
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let profile: PlanetProfile = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(profile.planet_type.to_string(), "Ice Giant");

        let response = warp::test::request()
            .path("/planets/planet-9/profile")
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn submit_route_validates_at_the_boundary() {
        let bridge = bridge_with(&[]);
        let routes = bridge.routes();
        let request = build_request(Preset::Candidate, ModelSelection::default());

        let accepted = warp::test::request()
            .method("POST")
            .path("/detections")
            .json(&json!({
                "request": request,
                "response": {"prediction": "Candidate Exoplanet", "confidence": 0.71}
            }))
            .reply(&routes)
            .await;
        assert_eq!(accepted.status(), StatusCode::CREATED);
        let detection: Detection = serde_json::from_slice(accepted.body()).unwrap();
        assert_eq!(detection.classification, Classification::Candidate);

        let rejected = warp::test::request()
            .method("POST")
            .path("/detections")
            .json(&json!({
                "request": request,
                "response": {"prediction": "Error", "confidence": 0.0, "error": "boom"}
            }))
            .reply(&routes)
            .await;
        assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(read(&bridge.registry).len(), 1);
        assert_eq!(bridge.metrics.snapshot().rejected, 1);
    }
}
