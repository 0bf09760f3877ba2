use schemars::schema_for;
use serde_json::{Map, Value};

use crate::collection::Collection;
use crate::model::{Club, Event, Reservation, Table};

/// JSON Schemas of the seeded documents, keyed by collection name.
pub fn document_schemas() -> Value {
    let entries = [
        (Collection::Clubs, serde_json::to_value(schema_for!(Club))),
        (Collection::Events, serde_json::to_value(schema_for!(Event))),
        (Collection::Tables, serde_json::to_value(schema_for!(Table))),
        (
            Collection::Reservations,
            serde_json::to_value(schema_for!(Reservation)),
        ),
    ];

    let mut map = Map::new();
    for (collection, schema) in entries {
        map.insert(collection.as_str().to_string(), schema.unwrap_or(Value::Null));
    }
    Value::Object(map)
}
