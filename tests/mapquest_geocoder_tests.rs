//! MapQuest adapter tests against canned HTTP responses.

use std::sync::Arc;

use geocoding::{
    AddressAction, AsyncGeocoder, BatchGeocoder, BlockingGeocoder, Bounds, DataFormat,
    GeocodeError, Geocoder, HttpResponse, Location, MapQuestGeocoder, MapQuestQuality,
    MapQuestRequest, MockTransport, ProviderErrorKind, RequestOptions,
};

const FRANKFURT_ODER: &str = include_str!("fixtures/mapquest_frankfurt_oder.json");
const BATCH_WILSHIRE: &str = include_str!("fixtures/mapquest_batch_wilshire.json");
const ZERO_RESULTS: &str = include_str!("fixtures/mapquest_zero_results.json");
const REVERSE_BERLIN: &str = include_str!("fixtures/mapquest_reverse_berlin.json");

fn frankfurt_oder_box() -> Bounds {
    Bounds::from_corners([52.4270, 14.3584, 52.2365, 14.7018]).unwrap()
}

fn geocoder(transport: &Arc<MockTransport>) -> MapQuestGeocoder {
    MapQuestGeocoder::new("test-key", transport.clone()).unwrap()
}

#[test]
fn test_blank_key_is_invalid_configuration() {
    let transport = Arc::new(MockTransport::new());

    for key in ["", "   "] {
        let err = MapQuestGeocoder::new(key, transport.clone()).err().unwrap();
        assert!(err.is_invalid_configuration(), "key {:?}", key);
    }
    assert!(MapQuestGeocoder::new("abc123", transport).is_ok());
}

#[test]
fn test_materialization_is_idempotent() {
    let transport = Arc::new(MockTransport::new());
    let geocoder = geocoder(&transport).with_bounding_box(Some(frankfurt_oder_box()));
    let request = geocoder.request(AddressAction::new("Frankfurt"));

    assert_eq!(request.uri().unwrap(), request.uri().unwrap());
    assert_eq!(request.body().unwrap(), request.body().unwrap());
    assert_eq!(request.to_string(), request.to_string());
}

#[test]
fn test_bounding_box_parameter() {
    let transport = Arc::new(MockTransport::new());

    let unbounded = geocoder(&transport).request(AddressAction::new("Frankfurt"));
    assert!(!unbounded.uri().unwrap().as_str().contains("boundingBox"));

    let bounded = geocoder(&transport)
        .with_bounding_box(Some(frankfurt_oder_box()))
        .request(AddressAction::new("Frankfurt"));
    assert!(bounded
        .uri()
        .unwrap()
        .as_str()
        .contains("boundingBox=52.427,14.3584,52.2365,14.7018"));
}

#[test]
fn test_format_parameters_only_when_not_json() {
    let request = MapQuestRequest::new("test-key", AddressAction::new("Denver, CO")).unwrap();
    let uri = request.uri().unwrap();
    assert!(!uri.as_str().contains("inFormat"));
    assert!(!uri.as_str().contains("outFormat"));

    let err = request.clone().with_input_format(DataFormat::Kvp).unwrap_err();
    assert!(err.is_invalid_configuration());

    let request = request.with_output_format(DataFormat::Xml);
    let uri = request.uri().unwrap();
    assert!(!uri.as_str().contains("inFormat"));
    assert!(uri.as_str().contains("outFormat=xml"));
}

#[tokio::test]
async fn test_frankfurt_in_bounding_box() {
    let transport = Arc::new(MockTransport::new().route("boundingBox=", FRANKFURT_ODER));
    let bounds = frankfurt_oder_box();
    let geocoder = geocoder(&transport).with_bounding_box(Some(bounds));

    let result = geocoder.geocode("Frankfurt").await.unwrap();

    let best = result.first().expect("at least one result");
    assert!(bounds.contains(&best.location()));
    assert_eq!(best.components().locality.as_deref(), Some("Frankfurt (Oder)"));
    assert_eq!(best.provider(), "mapquest");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].verb.as_str(), "POST");
    assert!(requests[0].body.as_deref().unwrap().contains("\"location\":\"Frankfurt\""));
}

#[tokio::test]
async fn test_batch_isolates_unknown_place() {
    let transport = Arc::new(MockTransport::new().enqueue_json(BATCH_WILSHIRE));
    let addresses = vec![
        "Wilshire & Bundy, Los Angeles".to_string(),
        "ThisIsNotARealPlace9999".to_string(),
    ];

    let items = geocoder(&transport).geocode_batch(&addresses).await;

    assert_eq!(items.len(), 2);
    let first = items[0].result().expect("position 0 succeeds");
    assert!(!first.is_empty());
    assert_eq!(
        first.first().unwrap().address_type(),
        &geocoding::AddressType::MapQuest(MapQuestQuality::Intersection)
    );
    match &items[1].outcome {
        Ok(result) => assert!(result.is_empty()),
        Err(e) => assert!(e.is_provider_error()),
    }

    // One native request for both locations.
    assert_eq!(transport.request_count(), 1);
    let body = transport.requests()[0].body.clone().unwrap();
    assert!(body.contains("\"locations\":[\"Wilshire & Bundy, Los Angeles\",\"ThisIsNotARealPlace9999\"]"));
}

#[tokio::test]
async fn test_batch_blank_position_does_not_reach_provider() {
    let body = r#"{"info": {"statuscode": 0}, "results": [{"locations": []}, {"locations": []}]}"#;
    let transport = Arc::new(MockTransport::new().enqueue_json(body));
    let addresses = vec!["Paris".to_string(), " ".to_string(), "Rome".to_string()];

    let items = geocoder(&transport).geocode_batch(&addresses).await;

    assert_eq!(items.len(), 3);
    assert!(items[0].is_ok());
    assert!(matches!(items[1].error(), Some(GeocodeError::InvalidInput(_))));
    assert!(items[2].is_ok());
    assert!(!transport.requests()[0].body.clone().unwrap().contains("\" \""));
}

#[tokio::test]
async fn test_batch_transport_failure_reported_per_position() {
    let transport = Arc::new(MockTransport::new());
    let addresses = vec!["Paris".to_string(), "Rome".to_string()];

    let items = geocoder(&transport).geocode_batch(&addresses).await;

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.error().is_some_and(|e| e.is_transport_error())));
}

#[tokio::test]
async fn test_batch_chunks_fail_independently() {
    let groups = vec![serde_json::json!({"locations": []}); 100];
    let first_chunk = serde_json::json!({"info": {"statuscode": 0}, "results": groups}).to_string();
    let transport = Arc::new(
        MockTransport::new()
            .enqueue_json(first_chunk)
            .enqueue(Ok(HttpResponse::new(500, "Internal Server Error"))),
    );
    let addresses: Vec<String> = (0..150).map(|i| format!("Place {}", i)).collect();

    let items = geocoder(&transport).geocode_batch(&addresses).await;

    assert_eq!(items.len(), 150);
    assert!(items[..100].iter().all(|item| item.is_ok()));
    assert!(items[100..]
        .iter()
        .all(|item| item.error().is_some_and(|e| e.is_provider_error())));
    assert_eq!(items[149].query, geocoding::GeocodeQuery::address("Place 149"));

    // The first request carries exactly positions 0..100.
    assert_eq!(transport.request_count(), 2);
    let requests = transport.requests();
    let first_body = requests[0].body.clone().unwrap();
    assert!(first_body.contains("\"Place 99\""));
    assert!(!first_body.contains("\"Place 100\""));
    assert!(requests[1].body.clone().unwrap().contains("\"Place 100\""));
}

#[tokio::test]
async fn test_zero_results_is_empty_success() {
    let transport = Arc::new(MockTransport::new().enqueue_json(ZERO_RESULTS));

    let result = geocoder(&transport)
        .geocode("ThisIsNotARealPlace9999")
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_reverse_geocode() {
    let transport = Arc::new(MockTransport::new().route("\"latLng\"", REVERSE_BERLIN));
    let location = Location::new(52.5163, 13.3777).unwrap();

    let result = geocoder(&transport).reverse_geocode(&location).await.unwrap();

    let best = result.first().unwrap();
    assert_eq!(best.components().street.as_deref(), Some("Pariser Platz"));
    assert_eq!(best.components().postal_code.as_deref(), Some("10117"));
    assert!(transport.requests()[0].url.path().ends_with("/reverse"));
}

#[tokio::test]
async fn test_max_results_truncates() {
    let body = r#"{"info": {"statuscode": 0}, "results": [{"locations": [
        {"adminArea5": "A", "latLng": {"lat": 1.0, "lng": 1.0}},
        {"adminArea5": "B", "latLng": {"lat": 2.0, "lng": 2.0}}
    ]}]}"#;
    let transport = Arc::new(MockTransport::new().enqueue_json(body));
    let geocoder =
        geocoder(&transport).with_options(RequestOptions::new().with_max_results(1));

    let result = geocoder.geocode("anywhere").await.unwrap();

    assert_eq!(result.len(), 1);
    assert!(transport.requests()[0].body.clone().unwrap().contains("\"maxResults\":1"));
}

#[tokio::test]
async fn test_http_forbidden_is_invalid_credentials() {
    let transport = Arc::new(MockTransport::new().enqueue(Ok(HttpResponse::new(
        403,
        "The AppKey submitted with this request is invalid.",
    ))));

    let err = geocoder(&transport).geocode("Denver, CO").await.unwrap_err();

    assert_eq!(err.provider_error_kind(), Some(ProviderErrorKind::InvalidCredentials));
}

#[tokio::test]
async fn test_blank_address_is_rejected_before_sending() {
    let transport = Arc::new(MockTransport::new());

    let err = geocoder(&transport).geocode("  ").await.unwrap_err();

    assert!(matches!(err, GeocodeError::InvalidInput(_)));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_blocking_wrapper() {
    let transport = Arc::new(MockTransport::new().route("boundingBox=", FRANKFURT_ODER));
    let bounds = frankfurt_oder_box();
    let blocking =
        BlockingGeocoder::new(geocoder(&transport).with_bounding_box(Some(bounds))).unwrap();

    let result = blocking.geocode("Frankfurt").unwrap();

    assert!(bounds.contains(&result.first().unwrap().location()));
}

#[test]
fn test_blocking_batch() {
    let transport = Arc::new(MockTransport::new().enqueue_json(BATCH_WILSHIRE));
    let blocking = BlockingGeocoder::new(geocoder(&transport)).unwrap();

    let items = blocking.geocode_batch(&[
        "Wilshire & Bundy, Los Angeles".to_string(),
        "ThisIsNotARealPlace9999".to_string(),
    ]);

    assert_eq!(items.len(), 2);
    assert!(items[0].result().is_some_and(|r| !r.is_empty()));
}

#[tokio::test]
#[ignore = "needs MAPQUEST_API_KEY and network access"]
async fn test_live_frankfurt() {
    let transport = Arc::new(geocoding::ReqwestTransport::new().unwrap());
    let bounds = frankfurt_oder_box();
    let geocoder = MapQuestGeocoder::from_env(transport)
        .unwrap()
        .with_bounding_box(Some(bounds));

    let result = geocoder.geocode("Frankfurt").await.unwrap();

    assert!(bounds.contains(&result.first().unwrap().location()));
}
