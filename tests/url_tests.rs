//! Tests for setting, replacing and removing hash parameters on full URLs.

use hash_params::*;

const SEARCH: &str = "https://foo.com/?key1=val1&key2=val2";

#[test]
fn test_replace_value_with_prehash() {
    let url = format!("{}#prehashthing?hashkey1=hashvalue1&hashkey2=hashvalue2", SEARCH);
    let result = set_hash_param_in_url(&url, "hashkey1", Some("hashvalue1-replaced")).unwrap();
    assert_eq!(
        result.as_str(),
        "https://foo.com/?key1=val1&key2=val2#prehashthing?hashkey1=hashvalue1-replaced&hashkey2=hashvalue2"
    );
}

#[test]
fn test_replace_value_without_prehash() {
    let url = format!("{}#?hashkey1=hashvalue1&hashkey2=hashvalue2", SEARCH);
    let result = set_hash_param_in_url(&url, "hashkey1", Some("hashvalue1-replaced")).unwrap();
    assert_eq!(
        result.as_str(),
        "https://foo.com/?key1=val1&key2=val2#?hashkey1=hashvalue1-replaced&hashkey2=hashvalue2"
    );
}

#[test]
fn test_remove_all_params_with_search_params() {
    let url = format!("{}#?hashkey1=hashvalue1&hashkey2=hashvalue2", SEARCH);
    let result = set_hash_param_in_url(&url, "hashkey1", None).unwrap();
    let result = set_hash_param_in_url(result.as_str(), "hashkey2", None).unwrap();
    assert_eq!(result.as_str(), SEARCH);
}

#[test]
fn test_remove_from_url_without_hash() {
    let result = set_hash_param_in_url("https://foo.com/", "hashkey1", None).unwrap();
    let result = set_hash_param_in_url(result.as_str(), "hashkey2", None).unwrap();
    assert_eq!(result.as_str(), "https://foo.com/");
}

#[test]
fn test_remove_all_params_keeps_prehash() {
    let url = format!("{}#prehashthing?hashkey1=hashvalue1&hashkey2=hashvalue2", SEARCH);
    let result = delete_hash_param_from_url(&url, "hashkey1").unwrap();
    let result = delete_hash_param_from_url(result.as_str(), "hashkey2").unwrap();
    assert_eq!(result.as_str(), "https://foo.com/?key1=val1&key2=val2#prehashthing");

    let url = "https://foo.com/#prehashthing?hashkey1=hashvalue1&hashkey2=hashvalue2";
    let result = set_hash_params_in_url(url, [("hashkey1", None::<&str>), ("hashkey2", None)]).unwrap();
    assert_eq!(result.as_str(), "https://foo.com/#prehashthing");
}

#[test]
fn test_remove_one_param() {
    let url = format!("{}#prehashthing?hashkey1=hashvalue1&hashkey2=hashvalue2", SEARCH);
    let result = set_hash_param_in_url(&url, "hashkey1", None).unwrap();
    assert_eq!(
        result.as_str(),
        "https://foo.com/?key1=val1&key2=val2#prehashthing?hashkey2=hashvalue2"
    );

    let url = format!("{}#?hashkey1=hashvalue1&hashkey2=hashvalue2", SEARCH);
    let result = set_hash_param_in_url(&url, "hashkey1", None).unwrap();
    assert_eq!(result.as_str(), "https://foo.com/?key1=val1&key2=val2#?hashkey2=hashvalue2");
}

#[test]
fn test_set_multiple_params() {
    let url = format!("{}#prehashthing", SEARCH);
    let result = set_hash_params_in_url(
        &url,
        [
            ("hashkey1", Some("value1")),
            ("hashkey2", Some("value2")),
            ("hashkey3", None),
        ],
    )
    .unwrap();

    assert_eq!(
        result.as_str(),
        "https://foo.com/?key1=val1&key2=val2#prehashthing?hashkey1=value1&hashkey2=value2"
    );

    let fragment = get_url_hash_params(result.as_str()).unwrap();
    assert_eq!(fragment.prehash, "prehashthing");
    assert_eq!(fragment.get("hashkey1"), Some("value1"));
    assert_eq!(fragment.get("hashkey2"), Some("value2"));
    assert_eq!(fragment.get("hashkey3"), None);
}

#[test]
fn test_set_multiple_params_with_existing() {
    let url = format!("{}#prehashthing?existingkey=existingvalue", SEARCH);
    let result = set_hash_params_in_url(
        &url,
        [
            ("newkey1", Some("newvalue1")),
            ("newkey2", Some("newvalue2")),
            ("existingkey", Some("updatedvalue")),
        ],
    )
    .unwrap();

    let fragment = get_url_hash_params(result.as_str()).unwrap();
    assert_eq!(fragment.params.len(), 3);
    assert_eq!(fragment.prehash, "prehashthing");
    assert_eq!(fragment.get("newkey1"), Some("newvalue1"));
    assert_eq!(fragment.get("newkey2"), Some("newvalue2"));
    assert_eq!(fragment.get("existingkey"), Some("updatedvalue"));
}

#[test]
fn test_json_value_with_prehash() {
    let blob = serde_json::json!({"foo": "bar", "1": true});
    let url = format!("{}#prehashthing", SEARCH);
    let result = set_hash_param_json_in_url(&url, "hashkey1", Some(&blob)).unwrap();

    let encoded = blob_to_base64(&blob).unwrap();
    assert_eq!(
        result.as_str(),
        format!("https://foo.com/?key1=val1&key2=val2#prehashthing?hashkey1={}", encoded)
    );
}

#[test]
fn test_search_params_are_untouched() {
    let url = "https://foo.com/path?hashkey=search#?hashkey=hash";
    let result = set_hash_param_in_url(url, "hashkey", Some("updated")).unwrap();
    assert_eq!(result.query(), Some("hashkey=search"));
    assert_eq!(get_hash_param_value(result.as_str(), "hashkey").unwrap(), Some("updated".to_string()));
}

#[test]
fn test_invalid_url_is_error() {
    let result = set_hash_param_in_url("://missing-scheme", "k", Some("v"));
    assert!(matches!(result, Err(HashParamError::UrlParseError(_))));
}
