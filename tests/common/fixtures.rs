use serde_json::{json, Value};

/// A version 1 document with the given top level components.
pub fn document(components: Vec<Value>) -> Value {
    json!({
        "version": 1,
        "components": components
    })
}

/// A leaf with an exact size and the default absolute spec.
pub fn fixed(id: &str, width: f64, height: f64) -> Value {
    json!({
        "identifier": id,
        "properties": { "size": { "width": width, "height": height } }
    })
}

pub fn fixed_at(id: &str, x: f64, y: f64, width: f64, height: f64) -> Value {
    json!({
        "identifier": id,
        "properties": {
            "position": { "x": x, "y": y },
            "size": { "width": width, "height": height }
        }
    })
}

/// A leaf without a size that grows along the stack axis.
pub fn growing(id: &str, grow: f64) -> Value {
    json!({
        "identifier": id,
        "properties": { "flexGrow": grow }
    })
}

pub fn container(id: &str, layout_spec: Value, children: Vec<Value>) -> Value {
    json!({
        "identifier": id,
        "layoutSpec": layout_spec,
        "childComponents": children
    })
}

pub fn horizontal_stack(spacing: f64) -> Value {
    json!({ "type": "stack", "axis": "horizontal", "spacing": spacing })
}

pub fn size_to_fit() -> Value {
    json!({ "type": "absolute", "sizing": "sizeToFit" })
}
