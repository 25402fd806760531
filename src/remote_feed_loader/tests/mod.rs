use super::*;
use crate::error::HttpClientError;
use crate::testing::HttpClientSpy;
use std::sync::Mutex;
use uuid::Uuid;

fn any_url() -> Url {
    Url::parse("https://a-url.com").unwrap()
}

fn make_loader(url: Url) -> (RemoteFeedLoader, Arc<HttpClientSpy>) {
    let client = Arc::new(HttpClientSpy::new());
    let loader = RemoteFeedLoader::new(url, client.clone());
    (loader, client)
}

/// Start a load whose results are collected into the returned list
fn load_capturing(loader: &RemoteFeedLoader) -> Arc<Mutex<Vec<LoadResult>>> {
    let results = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&results);
    loader.load(Box::new(move |result| sink.lock().unwrap().push(result)));
    results
}

fn make_items_json(items: &[serde_json::Value]) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "items": items })).unwrap()
}

fn make_item(
    id: Uuid,
    description: Option<&str>,
    location: Option<&str>,
    image_url: &str,
) -> (FeedImage, serde_json::Value) {
    let model = FeedImage {
        id,
        description: description.map(str::to_string),
        location: location.map(str::to_string),
        url: Url::parse(image_url).unwrap(),
    };

    let mut json = serde_json::Map::new();
    json.insert("id".to_string(), id.to_string().into());
    if let Some(description) = description {
        json.insert("description".to_string(), description.into());
    }
    if let Some(location) = location {
        json.insert("location".to_string(), location.into());
    }
    json.insert("image".to_string(), image_url.into());

    (model, serde_json::Value::Object(json))
}

fn transport_error() -> HttpClientError {
    HttpClientError::Transport(Box::new(std::io::Error::other("offline")))
}

#[test]
fn test_new_does_not_request_data() {
    let (_loader, client) = make_loader(any_url());

    assert!(client.requested_urls().is_empty());
}

#[test]
fn test_load_requests_data_from_url() {
    let url = Url::parse("https://a-given-url.com").unwrap();
    let (loader, client) = make_loader(url.clone());

    loader.load(Box::new(|_| {}));

    assert_eq!(client.requested_urls(), vec![url]);
}

#[test]
fn test_load_twice_requests_data_twice() {
    let url = Url::parse("https://a-given-url.com").unwrap();
    let (loader, client) = make_loader(url.clone());

    loader.load(Box::new(|_| {}));
    loader.load(Box::new(|_| {}));

    assert_eq!(client.requested_urls(), vec![url.clone(), url]);
}

#[test]
fn test_load_delivers_connectivity_error_on_client_error() {
    let (loader, client) = make_loader(any_url());

    let results = load_capturing(&loader);
    client.complete_with_error(transport_error(), 0);

    assert_eq!(*results.lock().unwrap(), vec![Err(LoadError::Connectivity)]);
}

#[test]
fn test_load_delivers_connectivity_error_on_invalid_response() {
    let (loader, client) = make_loader(any_url());

    let results = load_capturing(&loader);
    client.complete_with_error(HttpClientError::InvalidResponse, 0);

    assert_eq!(*results.lock().unwrap(), vec![Err(LoadError::Connectivity)]);
}

#[test]
fn test_load_delivers_invalid_data_on_non_200_response() {
    let (loader, client) = make_loader(any_url());
    let json = make_items_json(&[]);

    for (index, status) in [199, 201, 300, 400, 500].into_iter().enumerate() {
        let results = load_capturing(&loader);
        client.complete_with_status(status, &json, index);

        assert_eq!(
            *results.lock().unwrap(),
            vec![Err(LoadError::InvalidData)],
            "status {status}"
        );
    }
}

#[test]
fn test_load_delivers_invalid_data_on_200_with_invalid_json() {
    let (loader, client) = make_loader(any_url());

    let results = load_capturing(&loader);
    client.complete_with_status(200, b"invalid JSON", 0);

    assert_eq!(*results.lock().unwrap(), vec![Err(LoadError::InvalidData)]);
}

#[test]
fn test_load_delivers_no_items_on_200_with_empty_list() {
    let (loader, client) = make_loader(any_url());

    let results = load_capturing(&loader);
    client.complete_with_status(200, br#"{"items":[]}"#, 0);

    assert_eq!(*results.lock().unwrap(), vec![Ok(Vec::new())]);
}

#[test]
fn test_load_delivers_items_on_200_with_valid_json() {
    let (loader, client) = make_loader(any_url());

    let (item1, json1) = make_item(Uuid::new_v4(), None, None, "https://a-given-url.com/");
    let (item2, json2) = make_item(
        Uuid::new_v4(),
        Some("some desc"),
        Some("some location"),
        "https://b-given-url.com/",
    );

    let results = load_capturing(&loader);
    client.complete_with_status(200, &make_items_json(&[json1, json2]), 0);

    assert_eq!(*results.lock().unwrap(), vec![Ok(vec![item1, item2])]);
}

#[test]
fn test_load_does_not_deliver_result_after_loader_dropped() {
    let (loader, client) = make_loader(any_url());

    let results = load_capturing(&loader);
    drop(loader);
    client.complete_with_status(200, &make_items_json(&[]), 0);

    assert!(results.lock().unwrap().is_empty());
}

#[test]
fn test_load_does_not_deliver_error_after_loader_dropped() {
    let (loader, client) = make_loader(any_url());

    let results = load_capturing(&loader);
    drop(loader);
    client.complete_with_error(transport_error(), 0);

    assert!(results.lock().unwrap().is_empty());
}

#[test]
fn test_concurrent_loads_complete_independently_in_any_order() {
    let (loader, client) = make_loader(any_url());

    let first = load_capturing(&loader);
    let second = load_capturing(&loader);

    client.complete_with_status(500, b"", 1);
    assert!(first.lock().unwrap().is_empty());
    assert_eq!(*second.lock().unwrap(), vec![Err(LoadError::InvalidData)]);

    client.complete_with_status(200, br#"{"items":[]}"#, 0);
    assert_eq!(*first.lock().unwrap(), vec![Ok(Vec::new())]);
    assert_eq!(second.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_load_feed_awaits_result() {
    let client = Arc::new(crate::testing::HttpClientStub::new());
    client.set_outcome(crate::reqwest_client::RawOutcome::response(
        crate::reqwest_client::RawResponse::Http(crate::http_client::HttpResponse::new(
            any_url(),
            200,
        )),
        Some(br#"{"items":[]}"#.to_vec()),
    ));
    let loader = RemoteFeedLoader::new(any_url(), client);

    assert_eq!(loader.load_feed().await, Ok(Vec::new()));
}

#[tokio::test]
async fn test_load_feed_maps_dropped_completion_to_connectivity() {
    struct Forgetful;

    impl HttpClient for Forgetful {
        fn get(&self, _url: &Url, completion: crate::http_client::HttpCompletion) {
            drop(completion);
        }
    }

    let loader = RemoteFeedLoader::new(any_url(), Arc::new(Forgetful));

    assert_eq!(loader.load_feed().await, Err(LoadError::Connectivity));
}

#[test]
fn test_from_config_rejects_invalid_config() {
    let config = Config::new(Url::parse("ftp://a-url.com").unwrap());

    assert!(matches!(
        RemoteFeedLoader::from_config(&config),
        Err(crate::error::Error::Config { .. })
    ));
}

#[tokio::test]
async fn test_from_config_uses_feed_url() {
    let config = Config::new(any_url());
    let loader = RemoteFeedLoader::from_config(&config).unwrap();

    assert_eq!(loader.url(), &any_url());
}
