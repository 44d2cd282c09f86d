//! Response envelope detection.
//!
//! The backend has returned offers in several shapes over time. We accept, in
//! order:
//!
//! 1. a bare array of offers
//! 2. an object with an array under `data`, `offers` or `items`
//! 3. an object whose `data` is a single offer
//! 4. a single offer object (has an `id`)
//!
//! Anything else is logged and treated as an empty collection.
use ingest::{IngestError, RawOffer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const WRAPPER_KEYS: [&str; 3] = ["data", "offers", "items"];

/// Pulls the offer list out of whatever shape the backend sent.
pub fn extract_offers(value: Value) -> Vec<RawOffer> {
    match value {
        Value::Array(items) => parse_offer_array(items),
        Value::Object(mut map) => {
            for key in WRAPPER_KEYS {
                if let Some(Value::Array(_)) = map.get(key) {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        debug!(wrapper = key, "offers_envelope_wrapped_array");
                        return parse_offer_array(items);
                    }
                }
            }

            if let Some(Value::Object(inner)) = map.get("data") {
                if inner.contains_key("id") {
                    if let Some(data) = map.remove("data") {
                        return parse_offer_value(data).into_iter().collect();
                    }
                }
            }

            if map.contains_key("id") {
                return parse_offer_object(map).into_iter().collect();
            }

            warn!(
                keys = ?map.keys().collect::<Vec<_>>(),
                "offers_envelope_unrecognized"
            );
            Vec::new()
        }
        other => {
            warn!(kind = value_kind(&other), "offers_envelope_unrecognized");
            Vec::new()
        }
    }
}

/// Like [`extract_offers`], but for a by-id response: the offer whose id
/// matches `id`, if the body holds one.
pub fn extract_offer(value: Value, id: &str) -> Option<RawOffer> {
    extract_offers(value)
        .into_iter()
        .find(|offer| offer.id.as_deref().map(str::trim) == Some(id))
}

fn parse_offer_array(items: Vec<Value>) -> Vec<RawOffer> {
    let total = items.len();
    let offers: Vec<RawOffer> = items.into_iter().filter_map(parse_offer_value).collect();
    if offers.len() < total {
        warn!(
            skipped = total - offers.len(),
            total, "offers_envelope_entries_skipped"
        );
    }
    offers
}

fn parse_offer_object(map: Map<String, Value>) -> Option<RawOffer> {
    parse_offer_value(Value::Object(map))
}

fn parse_offer_value(value: Value) -> Option<RawOffer> {
    match serde_json::from_value::<RawOffer>(value).map_err(IngestError::from) {
        Ok(offer) => Some(offer),
        Err(err) => {
            debug!(error = %err, "offer_entry_undecodable");
            None
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
