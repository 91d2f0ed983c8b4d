use crate::scene::model::SceneDef;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

fn finite_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

pub(crate) fn validate_scene(def: &SceneDef) -> Result<(), SchemaErrors> {
    use SchemaPathElem::{Field, Index};

    let mut errors = Vec::new();

    if !(def.viewport_height.is_finite() && def.viewport_height > 0.0) {
        errors.push(SchemaError::at(
            &[Field("viewport_height")],
            "must be a positive finite number",
        ));
    }
    if !finite_non_negative(def.initial_offset) {
        errors.push(SchemaError::at(
            &[Field("initial_offset")],
            "must be a non-negative finite number",
        ));
    }

    let mut seen = HashSet::new();
    for (i, r) in def.regions.iter().enumerate() {
        let at = |field: &'static str| [Field("regions"), Index(i), Field(field)];
        if r.id.trim().is_empty() {
            errors.push(SchemaError::at(&at("id"), "must be non-empty"));
        } else if !seen.insert(r.id.as_str()) {
            errors.push(SchemaError::at(
                &at("id"),
                format!("duplicate region id '{}'", r.id),
            ));
        }
        if !finite_non_negative(r.top) {
            errors.push(SchemaError::at(
                &at("top"),
                "must be a non-negative finite number",
            ));
        }
        if !finite_non_negative(r.height) {
            errors.push(SchemaError::at(
                &at("height"),
                "must be a non-negative finite number",
            ));
        }
        if let Some(t) = r.threshold
            && !(0.0..=1.0).contains(&t)
        {
            errors.push(SchemaError::at(&at("threshold"), "must be within [0, 1]"));
        }
        if let Some(tw) = &r.typewriter
            && tw.show_cursor
            && tw.cursor_char.is_empty()
        {
            errors.push(SchemaError::at(
                &[
                    Field("regions"),
                    Index(i),
                    Field("typewriter"),
                    Field("cursor_char"),
                ],
                "must be non-empty when show_cursor is set",
            ));
        }
    }

    let mut last_at = 0u64;
    for (i, step) in def.scroll.iter().enumerate() {
        if step.at_ms < last_at {
            errors.push(SchemaError::at(
                &[Field("scroll"), Index(i), Field("at_ms")],
                format!("must not precede the previous step ({last_at}ms)"),
            ));
        }
        last_at = last_at.max(step.at_ms);
        if !finite_non_negative(step.offset) {
            errors.push(SchemaError::at(
                &[Field("scroll"), Index(i), Field("offset")],
                "must be a non-negative finite number",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/validate.rs"]
mod tests;
