//! End-to-end tests of the client against a mock JSON-RPC server.

use std::collections::HashSet;
use std::time::Duration;

use pianoteq_client::{
    ActivationInfo, ClientError, MetronomeUpdate, ParameterUpdate, PerformanceInfo,
    PianoteqClient, PianoteqInfo, PresetType, SequencerInfo,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Respond with `result`, echoing the request id.
fn echo_result(result: Value) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    move |req: &Request| {
        let body: Value = serde_json::from_slice(&req.body).unwrap();
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": result.clone(),
            "id": body["id"],
        }))
    }
}

async fn server_with(result: Value) -> (MockServer, PianoteqClient) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .respond_with(echo_result(result))
        .mount(&server)
        .await;
    let client = PianoteqClient::new(server.uri());
    (server, client)
}

async fn server_with_template(template: ResponseTemplate) -> (MockServer, PianoteqClient) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .respond_with(template)
        .mount(&server)
        .await;
    let client = PianoteqClient::new(server.uri());
    (server, client)
}

async fn sent_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn test_get_info_unwraps_singleton() {
    let (server, client) = server_with(json!([{
        "version": "8.4.0",
        "current_preset": {"name": "NY Steinway D Classical", "bank": "", "instrument": "NY Steinway D"}
    }]))
    .await;

    let info = client.get_info().await.unwrap();
    assert_eq!(info.version.as_deref(), Some("8.4.0"));
    assert_eq!(info.current_preset.unwrap().name, "NY Steinway D Classical");

    let bodies = sent_bodies(&server).await;
    assert_eq!(
        bodies,
        vec![json!({"jsonrpc": "2.0", "method": "getInfo", "params": [], "id": 1})]
    );

    let request = &server.received_requests().await.unwrap()[0];
    let content_type = request.headers.get("content-type").unwrap();
    assert_eq!(content_type.to_str().unwrap(), "application/json");
}

#[tokio::test]
async fn test_singletons_default_on_empty_list() {
    let (_server, client) = server_with(json!([])).await;

    assert_eq!(client.get_info().await.unwrap(), PianoteqInfo::default());
    assert_eq!(client.get_perf_info().await.unwrap(), PerformanceInfo::default());
    assert_eq!(
        client.get_sequencer_info().await.unwrap(),
        SequencerInfo::default()
    );
    assert_eq!(
        client.get_activation_info().await.unwrap(),
        ActivationInfo::default()
    );

    let metronome = client.get_metronome().await.unwrap();
    assert_eq!(metronome.timesig, "4/4");
    assert!(!metronome.enabled);
}

#[tokio::test]
async fn test_audio_device_info_is_bare_object() {
    let (_server, client) = server_with(json!({
        "audio_output_device_name": "USB Audio",
        "sample_rate": 44100,
        "buffer_size": "128",
        "device_type": "ALSA"
    }))
    .await;

    let device = client.get_audio_device_info().await.unwrap();
    assert_eq!(device.name, "USB Audio");
    assert_eq!(device.sample_rate.as_deref(), Some("44100"));
    assert_eq!(device.buffer_size.as_deref(), Some("128"));
}

#[tokio::test]
async fn test_audio_device_info_rejects_list() {
    let (_server, client) =
        server_with(json!([{"audio_output_device_name": "USB Audio"}])).await;

    let err = client.get_audio_device_info().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }), "{err:?}");
    assert!(err.is_protocol());
    assert!(err.to_string().contains("USB Audio"), "{err}");
}

#[tokio::test]
async fn test_audio_device_info_rejects_positional_array() {
    let (_server, client) = server_with(json!(["Speakers", "48000"])).await;

    let err = client.get_audio_device_info().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }), "{err:?}");
    assert!(err.to_string().contains("Speakers"), "{err}");
}

#[tokio::test]
async fn test_list_of_presets_with_both_instrument_keys() {
    let (_server, client) = server_with(json!([
        {"name": "Jazz", "bank": "", "instrument": "K2", "instr": "K2"}
    ]))
    .await;

    let presets = client.get_list_of_presets(PresetType::Full).await.unwrap();
    assert_eq!(presets.len(), 1);
    assert_eq!(presets[0].instrument.as_deref(), Some("K2"));
}

#[tokio::test]
async fn test_list_of_presets_resolves_instr_alias() {
    let (server, client) = server_with(json!([
        {"name": "Jazz Trio", "bank": "", "instr": "Steinway B", "tags": ["jazz"], "favourite": true},
        {"name": "Pop", "bank": "User", "instrument": "K2"}
    ]))
    .await;

    let presets = client.get_list_of_presets(PresetType::Full).await.unwrap();
    assert_eq!(presets.len(), 2);
    assert_eq!(presets[0].instrument.as_deref(), Some("Steinway B"));
    assert!(presets[0].is_favourite());
    assert_eq!(presets[1].instrument.as_deref(), Some("K2"));

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies[0]["params"], json!(["full"]));
}

#[tokio::test]
async fn test_decoding_tolerates_key_casing() {
    let (_server, client) = server_with(json!([{"Version": "8.4.0"}])).await;
    let info = client.get_info().await.unwrap();
    assert_eq!(info.version.as_deref(), Some("8.4.0"));
}

#[tokio::test]
async fn test_empty_body_is_protocol_failure() {
    let (_server, client) = server_with_template(ResponseTemplate::new(200)).await;
    let err = client.get_info().await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyResponse), "{err:?}");
    assert!(err.is_protocol());

    let (_server, client) =
        server_with_template(ResponseTemplate::new(200).set_body_string("  \n\t ")).await;
    let err = client.next_preset().await.unwrap_err();
    assert!(matches!(err, ClientError::EmptyResponse), "{err:?}");
}

#[tokio::test]
async fn test_malformed_body_carries_bounded_excerpt() {
    let body = format!("<html>{}</html>", "x".repeat(5000));
    let (_server, client) =
        server_with_template(ResponseTemplate::new(200).set_body_string(body)).await;

    let err = client.get_parameters().await.unwrap_err();
    match &err {
        ClientError::MalformedResponse { excerpt, .. } => {
            assert!(excerpt.starts_with("<html>xxx"));
            assert_eq!(excerpt.chars().count(), 200);
        }
        other => panic!("expected malformed response, got {other:?}"),
    }
    assert!(err.to_string().len() < 400);
}

#[tokio::test]
async fn test_remote_error_is_surfaced_verbatim() {
    let (_server, client) = server_with_template(ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "error": {"code": -32601, "message": "Method not found", "data": {"hint": "check list"}},
        "id": 1
    })))
    .await;

    let err = client.get_info().await.unwrap_err();
    assert!(err.is_remote());
    assert_eq!(err.code(), Some(-32601));
    assert_eq!(err.data(), Some(&json!({"hint": "check list"})));
    match err {
        ClientError::Remote(e) => assert_eq!(e.message, "Method not found"),
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_status_is_transport_failure() {
    let (_server, client) =
        server_with_template(ResponseTemplate::new(500).set_body_string("boom")).await;

    let err = client.mute().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = PianoteqClient::new(format!("http://127.0.0.1:{port}"));
    let err = client.panic().await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
}

#[tokio::test]
async fn test_mismatched_id_is_protocol_failure() {
    let (_server, client) = server_with_template(ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0", "result": [], "id": 42
    })))
    .await;

    let err = client.get_parameters().await.unwrap_err();
    assert!(
        matches!(err, ClientError::IdMismatch { expected: 1, ref actual } if *actual == json!(42)),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_absent_result() {
    let (_server, client) = server_with(Value::Null).await;

    let err = client.get_list_of_audio_devices().await.unwrap_err();
    assert!(matches!(err, ClientError::MissingResult { .. }), "{err:?}");

    client.undo().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_calls_get_distinct_ids() {
    let (server, client) = server_with(json!([])).await;

    let calls = (0..20).map(|_| {
        let client = client.clone();
        async move { client.get_parameters().await }
    });
    let results = futures::future::join_all(calls).await;
    assert!(results.iter().all(Result::is_ok));

    let ids: Vec<u64> = sent_bodies(&server)
        .await
        .iter()
        .map(|b| b["id"].as_u64().unwrap())
        .collect();
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 20);
    assert_eq!(unique, (1..=20).collect::<HashSet<u64>>());
}

#[tokio::test]
async fn test_commands_send_empty_params() {
    let (server, client) = server_with(Value::Null).await;

    client.reset_preset().await.unwrap();
    client.next_favourite_preset().await.unwrap();
    client.prev_instrument().await.unwrap();
    client.ab_switch().await.unwrap();
    client.redo().await.unwrap();
    client.midi_play().await.unwrap();
    client.midi_rewind().await.unwrap();
    client.quit().await.unwrap();

    let bodies = sent_bodies(&server).await;
    let methods: Vec<&str> = bodies.iter().map(|b| b["method"].as_str().unwrap()).collect();
    assert_eq!(
        methods,
        vec![
            "resetPreset",
            "nextFavouritePreset",
            "prevInstrument",
            "abSwitch",
            "redo",
            "midiPlay",
            "midiRewind",
            "quit"
        ]
    );
    for body in &bodies {
        assert_eq!(body["params"], json!([]));
    }
}

#[tokio::test]
async fn test_load_preset_arity_on_the_wire() {
    let (server, client) = server_with(Value::Null).await;

    client
        .load_preset("YC5 Basic", None, PresetType::Full)
        .await
        .unwrap();
    client
        .load_preset("YC5 Basic", Some("My Presets"), PresetType::Full)
        .await
        .unwrap();

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies[0]["params"], json!(["YC5 Basic"]));
    assert_eq!(bodies[1]["params"], json!(["YC5 Basic", "My Presets", "full"]));
}

#[tokio::test]
async fn test_keyed_payloads() {
    let (server, client) = server_with(Value::Null).await;

    client
        .set_parameters(&[ParameterUpdate::normalized("Volume", 0.5)])
        .await
        .unwrap();
    client
        .set_metronome(&MetronomeUpdate::new().bpm(120))
        .await
        .unwrap();
    client
        .midi_send(&[vec![0x90, 60, 100], vec![0x80, 60, 0]])
        .await
        .unwrap();

    let bodies = sent_bodies(&server).await;
    assert_eq!(
        bodies[0]["params"],
        json!({"list": [{"id": "Volume", "normalized_value": 0.5}]})
    );
    assert_eq!(bodies[1]["params"], json!({"bpm": 120}));
    assert_eq!(
        bodies[2]["params"],
        json!({"bytes": [[144, 60, 100], [128, 60, 0]]})
    );
}

#[tokio::test]
async fn test_positional_payloads() {
    let (server, client) = server_with(Value::Null).await;

    client
        .save_preset("Mine", "User", PresetType::Reverb)
        .await
        .unwrap();
    client.midi_seek(12.5).await.unwrap();
    client.randomize_parameters(0.3).await.unwrap();
    client.activate("SERIAL-1", "studio").await.unwrap();
    client.load_file("/tmp/tuning.scl").await.unwrap();

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies[0]["params"], json!(["Mine", "User", "reverb"]));
    assert_eq!(bodies[1]["params"], json!([12.5]));
    assert_eq!(bodies[2]["params"], json!([0.3]));
    assert_eq!(bodies[3]["params"], json!(["SERIAL-1", "studio"]));
    assert_eq!(bodies[4]["params"], json!(["/tmp/tuning.scl"]));
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"jsonrpc": "2.0", "result": [], "id": 1}))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let client = PianoteqClient::new(server.uri()).with_cancellation(token.clone());

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = client.get_info().await.unwrap_err();
    assert!(err.is_cancelled(), "{err:?}");
    assert!(!err.is_protocol());
}

#[tokio::test]
async fn test_cancelled_token_sends_nothing() {
    let (server, client) = server_with(json!([])).await;
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .with_cancellation(token)
        .get_metronome()
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_external_http_client_and_trailing_slash() {
    let (server, _) = server_with(json!([{"name": "getInfo", "spec": "getInfo()", "doc": ""}])).await;
    let client =
        PianoteqClient::with_http_client(reqwest::Client::new(), format!("{}/", server.uri()));

    let functions = client.list().await.unwrap();
    assert_eq!(functions[0].name, "getInfo");
}
