//! Integration tests for the journey planner and geocoding clients (wiremock-based)

use std::sync::Arc;

use domain::{GeoLocation, StopId, TransitMode};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_transit::{
    GeocodingClient, GeocodingError, JourneyPlannerClient, JourneyPlannerConfig, NominatimConfig,
    NominatimGeocodingClient, ObjectFilter, SiteIdCache, SlJourneyPlannerClient, TransitError,
};

fn client_for_mock(base_url: &str) -> (SlJourneyPlannerClient, Arc<SiteIdCache>) {
    let cache = Arc::new(SiteIdCache::new());
    let config = JourneyPlannerConfig::for_testing().with_base_url(base_url);
    let client = SlJourneyPlannerClient::new(&config, Arc::clone(&cache)).unwrap();
    (client, cache)
}

const fn fruangen_locations_json() -> &'static str {
    r#"{
        "locations": [
            {
                "id": "9091001000009261",
                "name": "Fruängsgården, Stockholm",
                "type": "stop",
                "coord": [59.2871, 17.9693],
                "productClasses": [5]
            },
            {
                "id": "9091001000009260",
                "isGlobalId": true,
                "name": "Fruängen, Stockholm",
                "disassembledName": "Fruängen",
                "type": "stop",
                "coord": [59.28655, 17.96493],
                "productClasses": [2, 5]
            }
        ]
    }"#
}

const fn nearby_locations_json() -> &'static str {
    r#"{
        "locations": [
            { "id": "9091001000009192", "name": "Slussen, Stockholm", "type": "stop", "coord": [59.3195, 18.0724] },
            { "id": "9091001000009193", "name": "Gamla stan, Stockholm", "type": "stop", "coord": [59.3231, 18.0676] }
        ]
    }"#
}

const fn trips_json() -> &'static str {
    r#"{
        "journeys": [{
            "tripDuration": 1260,
            "interchanges": 0,
            "legs": [{
                "origin": {
                    "name": "Slussen, Stockholm",
                    "departureTimePlanned": "2026-03-02T07:10:00Z"
                },
                "destination": {
                    "id": "9091001000009260",
                    "name": "Fruängen, Stockholm",
                    "arrivalTimePlanned": "2026-03-02T07:31:00Z"
                },
                "transportation": {
                    "disassembledName": "14",
                    "destination": { "name": "Fruängen" },
                    "product": { "class": 2 }
                },
                "duration": 1260
            }]
        }]
    }"#
}

#[tokio::test]
async fn test_find_stops_sends_filter_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .and(query_param("name_sf", "Götgatan"))
        .and(query_param("any_obj_filter_sf", "46"))
        .and(query_param("type_sf", "any"))
        .respond_with(ResponseTemplate::new(200).set_body_string(nearby_locations_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let stops = client
        .find_stops("Götgatan", ObjectFilter::StopsStreetsAndPois)
        .await
        .unwrap();

    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].name, "Slussen, Stockholm");
}

#[tokio::test]
async fn test_api_key_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .and(query_param("key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"locations": []}"#))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = JourneyPlannerConfig::for_testing().with_base_url(server.uri());
    config.api_key = Some("secret-key".to_string());
    let client = SlJourneyPlannerClient::new(&config, Arc::new(SiteIdCache::new())).unwrap();

    let stops = client.find_stops("Slussen", ObjectFilter::Stops).await.unwrap();
    assert!(stops.is_empty());
}

#[tokio::test]
async fn test_resolve_picks_first_substring_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .and(query_param("any_obj_filter_sf", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fruangen_locations_json()))
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let id = client.resolve_site_id("fruängen").await.unwrap();

    // "Fruängsgården" is ranked first upstream but does not contain the query
    assert_eq!(id.as_str(), "9091001000009260");
}

#[tokio::test]
async fn test_resolve_is_cached_per_literal_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .and(query_param("name_sf", "Fruängen"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fruangen_locations_json()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .and(query_param("name_sf", "FRUÄNGEN"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fruangen_locations_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, cache) = client_for_mock(&server.uri());

    let first = client.resolve_site_id("Fruängen").await.unwrap();
    let second = client.resolve_site_id("Fruängen").await.unwrap();
    let shouted = client.resolve_site_id("FRUÄNGEN").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, shouted);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn test_resolve_without_match_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .respond_with(ResponseTemplate::new(200).set_body_string(nearby_locations_json()))
        .mount(&server)
        .await;

    let (client, cache) = client_for_mock(&server.uri());
    let err = client.resolve_site_id("Mörby centrum").await.unwrap_err();

    assert!(matches!(err, TransitError::StopNotFound(ref name) if name == "Mörby centrum"));
    assert_eq!(
        err.to_string(),
        "Kunde inte hitta hållplatsen Mörby centrum just nu"
    );
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_nearby_sends_coordinate_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .and(query_param("type_sf", "coord"))
        .and(query_param("name_sf", "18.07:59.32:WGS84[dd.ddddd]"))
        .and(query_param("any_obj_filter_sf", "2"))
        .and(query_param("max_no", "10"))
        .and(query_param("radius_sf", "1500"))
        .respond_with(ResponseTemplate::new(200).set_body_string(nearby_locations_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let location = GeoLocation::new(59.32, 18.07).unwrap();
    let stops = client.find_nearby_stops(&location, 1500).await.unwrap();

    assert_eq!(stops.len(), 2);
    // upstream order is kept
    assert_eq!(stops[1].name, "Gamla stan, Stockholm");
}

#[tokio::test]
async fn test_nearby_empty_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"locations": []}"#))
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let err = client
        .find_nearby_stops(&GeoLocation::slussen(), 1000)
        .await
        .unwrap_err();

    assert!(matches!(err, TransitError::NoNearbyStops));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_search_trips_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips"))
        .and(query_param("type_origin", "coord"))
        .and(query_param("name_origin", "18.07:59.32:WGS84[dd.ddddd]"))
        .and(query_param("type_destination", "any"))
        .and(query_param("name_destination", "9091001000009260"))
        .and(query_param("calc_number_of_trips", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(trips_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let origin = GeoLocation::new(59.32, 18.07).unwrap();
    let destination = StopId::new("9091001000009260").unwrap();

    let trips = client.search_trips(&origin, &destination, 3).await.unwrap();

    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].duration_minutes(), 21);
    assert_eq!(trips[0].legs[0].transportation.mode, TransitMode::Metro);
}

#[tokio::test]
async fn test_search_trips_clamps_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips"))
        .and(query_param("calc_number_of_trips", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"journeys": []}"#))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let trips = client
        .search_trips(
            &GeoLocation::slussen(),
            &StopId::new("9091001000009260").unwrap(),
            50,
        )
        .await
        .unwrap();

    assert!(trips.is_empty());
}

#[tokio::test]
async fn test_search_trips_without_journeys_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"systemMessages": []}"#))
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let trips = client
        .search_trips(&GeoLocation::slussen(), &StopId::new("1").unwrap(), 3)
        .await
        .unwrap();

    assert!(trips.is_empty());
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let err = client
        .search_trips(&GeoLocation::slussen(), &StopId::new("1").unwrap(), 3)
        .await
        .unwrap_err();

    assert!(matches!(err, TransitError::RequestFailed(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let err = client
        .find_stops("Slussen", ObjectFilter::Stops)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransitError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    let err = client
        .find_stops("Slussen", ObjectFilter::Stops)
        .await
        .unwrap_err();

    assert!(matches!(err, TransitError::ParseError(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    let (client, _) = client_for_mock("http://127.0.0.1:1");
    let err = client
        .find_stops("Slussen", ObjectFilter::Stops)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransitError::ConnectionFailed(_) | TransitError::Timeout { .. }
    ));
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stop-finder"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"locations": []}"#))
        .mount(&server)
        .await;

    let (client, _) = client_for_mock(&server.uri());
    assert!(client.is_healthy().await);

    let (offline, _) = client_for_mock("http://127.0.0.1:1");
    assert!(!offline.is_healthy().await);
}

#[tokio::test]
async fn test_geocode_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Götgatan 12 Stockholm"))
        .and(query_param("countrycodes", "se"))
        .and(query_param("limit", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"lat": "59.3145", "lon": "18.0735", "display_name": "Götgatan"}]"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client =
        NominatimGeocodingClient::new(&NominatimConfig::for_testing().with_base_url(server.uri()))
            .unwrap();
    let location = client.geocode("Götgatan 12 Stockholm").await.unwrap();

    assert!((location.latitude() - 59.3145).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_caches_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[{"lat": "59.3", "lon": "18.0"}]"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        cache_ttl_hours: 1,
        ..NominatimConfig::for_testing().with_base_url(server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();

    client.geocode("Hornsgatan").await.unwrap();
    client.geocode("hornsgatan").await.unwrap();
}

#[tokio::test]
async fn test_geocode_no_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client =
        NominatimGeocodingClient::new(&NominatimConfig::for_testing().with_base_url(server.uri()))
            .unwrap();
    let err = client.geocode("Ingenstans 99").await.unwrap_err();

    assert!(matches!(err, GeocodingError::AddressNotFound(_)));
}

#[tokio::test]
async fn test_geocode_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client =
        NominatimGeocodingClient::new(&NominatimConfig::for_testing().with_base_url(server.uri()))
            .unwrap();
    let err = client.geocode("Slussen").await.unwrap_err();

    assert!(matches!(err, GeocodingError::RateLimitExceeded));
}
