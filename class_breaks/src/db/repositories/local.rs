//! In-memory local repository implementation.
//!
//! Layers are stored as an ordered list of records (JSON objects keyed by
//! column name) with a declared schema. Relations are columns of type
//! [`FieldType::ForeignKey`] holding the `id` of a record in another layer.

use log::debug;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::db::repository::{FeatureRepository, RepositoryError, RepositoryResult};
use crate::models::{FieldPath, FieldType, SourceQuery};

/// Column holding each record's identifier.
pub const ID_FIELD: &str = "id";

/// A single row: column name to value.
pub type Record = Map<String, Value>;

static ID_FIELD_TYPE: FieldType = FieldType::Integer;

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same underlying data.
///
/// # Example
/// ```
/// use class_breaks::db::LocalRepository;
/// use class_breaks::models::FieldType;
/// use serde_json::json;
///
/// let repo = LocalRepository::new();
/// repo.create_layer("hydrant", vec![("number", FieldType::Integer), ("geom", FieldType::Point)])
///     .unwrap();
/// repo.insert_record("hydrant", json!({"number": 4, "geom": "POINT(0 0)"}))
///     .unwrap();
/// assert_eq!(repo.layer_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Debug, Default)]
struct LocalData {
    layers: Vec<Layer>,
    by_name: HashMap<String, usize>,
}

#[derive(Debug)]
struct Layer {
    name: String,
    schema: Vec<(String, FieldType)>,
    records: Vec<Record>,
    by_id: HashMap<i64, usize>,
    next_id: i64,
}

impl Layer {
    fn field_type(&self, field: &str) -> Option<&FieldType> {
        self.schema
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, field_type)| field_type)
    }

    fn require_field(&self, field: &str) -> RepositoryResult<&FieldType> {
        if field == ID_FIELD {
            return Ok(&ID_FIELD_TYPE);
        }
        self.field_type(field)
            .ok_or_else(|| RepositoryError::field_not_found(&self.name, field))
    }
}

impl LocalData {
    fn layer(&self, name: &str) -> RepositoryResult<&Layer> {
        self.by_name
            .get(name)
            .map(|&idx| &self.layers[idx])
            .ok_or_else(|| RepositoryError::LayerNotFound(name.to_string()))
    }

    /// Check every segment of a path against the schemas and return the
    /// layers visited, starting with `root`.
    fn resolve_path<'a>(
        &'a self,
        root: &'a Layer,
        path: &FieldPath,
    ) -> RepositoryResult<Vec<&'a Layer>> {
        let mut visited = vec![root];
        let mut current = root;

        for relation in path.relations() {
            let field_type = current.require_field(relation)?;
            let target = field_type.related_layer().ok_or_else(|| {
                RepositoryError::QueryError(format!(
                    "Field '{}' on layer '{}' is not a relation",
                    relation, current.name
                ))
            })?;
            current = self.layer(target)?;
            visited.push(current);
        }

        let leaf_type = current.require_field(path.leaf())?;
        if !leaf_type.is_numeric() {
            return Err(RepositoryError::ValidationError(format!(
                "Field '{}' on layer '{}' is not numeric ({:?})",
                path.leaf(),
                current.name,
                leaf_type
            )));
        }

        Ok(visited)
    }

    /// Follow the relations of `path` from `record` and read the leaf value.
    fn resolve_value(
        &self,
        layers: &[&Layer],
        record: &Record,
        path: &FieldPath,
    ) -> RepositoryResult<f64> {
        let mut current = record;

        for (step, relation) in path.relations().iter().enumerate() {
            let target = layers[step + 1];
            let id = current.get(relation).and_then(Value::as_i64).ok_or_else(|| {
                RepositoryError::ValidationError(format!(
                    "Missing relation '{}' on a '{}' record",
                    relation, layers[step].name
                ))
            })?;
            let idx = target.by_id.get(&id).ok_or_else(|| {
                RepositoryError::NotFound(format!(
                    "Record {} referenced by '{}' not found in layer '{}'",
                    id, relation, target.name
                ))
            })?;
            current = &target.records[*idx];
        }

        current
            .get(path.leaf())
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                RepositoryError::ValidationError(format!(
                    "Value of '{}' is missing or not a number",
                    path.as_str()
                ))
            })
    }

    fn selected<'a>(
        &'a self,
        query: &SourceQuery,
    ) -> RepositoryResult<(&'a Layer, Vec<&'a Record>)> {
        let layer = self.layer(&query.layer)?;
        for predicate in &query.predicates {
            layer.require_field(predicate.field())?;
        }

        let rows = layer
            .records
            .iter()
            .filter(|record| {
                query
                    .predicates
                    .iter()
                    .all(|p| p.matches(record.get(p.field())))
            })
            .collect();

        Ok((layer, rows))
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, LocalData>> {
        self.data
            .read()
            .map_err(|_| RepositoryError::InternalError("Repository lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, LocalData>> {
        self.data
            .write()
            .map_err(|_| RepositoryError::InternalError("Repository lock poisoned".to_string()))
    }

    /// Declare a new layer and its columns.
    ///
    /// Relation targets are checked lazily, when a query traverses them,
    /// so layers may be declared in any order.
    pub fn create_layer<S: Into<String>>(
        &self,
        name: &str,
        schema: Vec<(S, FieldType)>,
    ) -> RepositoryResult<()> {
        let mut data = self.write()?;
        if data.by_name.contains_key(name) {
            return Err(RepositoryError::ValidationError(format!(
                "Layer '{}' already exists",
                name
            )));
        }

        let mut columns: Vec<(String, FieldType)> = Vec::with_capacity(schema.len());
        for (field, field_type) in schema {
            let field = field.into();
            if field == ID_FIELD || columns.iter().any(|(existing, _)| *existing == field) {
                return Err(RepositoryError::ValidationError(format!(
                    "Duplicate or reserved column '{}' on layer '{}'",
                    field, name
                )));
            }
            columns.push((field, field_type));
        }

        let idx = data.layers.len();
        data.layers.push(Layer {
            name: name.to_string(),
            schema: columns,
            records: Vec::new(),
            by_id: HashMap::new(),
            next_id: 1,
        });
        data.by_name.insert(name.to_string(), idx);
        Ok(())
    }

    /// Append a record to a layer and return its id.
    ///
    /// A record without an `id` gets the next free one. Columns must be
    /// declared on the layer; numeric and relation columns must hold
    /// numbers (or null).
    pub fn insert_record(&self, layer: &str, record: Value) -> RepositoryResult<i64> {
        let Value::Object(mut record) = record else {
            return Err(RepositoryError::ValidationError(format!(
                "Records for layer '{}' must be JSON objects",
                layer
            )));
        };

        let mut data = self.write()?;
        let idx = *data
            .by_name
            .get(layer)
            .ok_or_else(|| RepositoryError::LayerNotFound(layer.to_string()))?;
        let target = &mut data.layers[idx];

        for (field, value) in record.iter() {
            if field == ID_FIELD {
                continue;
            }
            let field_type = target.require_field(field)?;
            let needs_number = field_type.is_numeric() || field_type.related_layer().is_some();
            if needs_number && !(value.is_number() || value.is_null()) {
                return Err(RepositoryError::ValidationError(format!(
                    "Field '{}' on layer '{}' expects a number, got {}",
                    field, layer, value
                )));
            }
        }

        let id = match record.get(ID_FIELD) {
            Some(value) => value.as_i64().ok_or_else(|| {
                RepositoryError::ValidationError(format!("Record id must be an integer: {}", value))
            })?,
            None => target.next_id,
        };
        if target.by_id.contains_key(&id) {
            return Err(RepositoryError::ValidationError(format!(
                "Duplicate id {} in layer '{}'",
                id, layer
            )));
        }

        record.insert(ID_FIELD.to_string(), Value::from(id));
        target.by_id.insert(id, target.records.len());
        target.records.push(record);
        target.next_id = target.next_id.max(id + 1);

        Ok(id)
    }

    /// Remove every layer.
    pub fn clear(&self) -> RepositoryResult<()> {
        let mut data = self.write()?;
        *data = LocalData::default();
        Ok(())
    }

    /// Get the number of layers stored.
    pub fn layer_count(&self) -> usize {
        self.read().map(|data| data.layers.len()).unwrap_or(0)
    }
}

impl FeatureRepository for LocalRepository {
    fn list_layers(&self) -> RepositoryResult<Vec<String>> {
        let data = self.read()?;
        Ok(data.layers.iter().map(|l| l.name.clone()).collect())
    }

    fn field_type(&self, layer: &str, field: &str) -> RepositoryResult<FieldType> {
        let data = self.read()?;
        data.layer(layer)?.require_field(field).cloned()
    }

    fn count(&self, query: &SourceQuery) -> RepositoryResult<usize> {
        let data = self.read()?;
        let (_, rows) = data.selected(query)?;
        Ok(rows.len())
    }

    fn fetch_ordered_values(
        &self,
        query: &SourceQuery,
        field: &FieldPath,
    ) -> RepositoryResult<Vec<f64>> {
        let data = self.read()?;
        let (layer, rows) = data.selected(query)?;
        let layers = data.resolve_path(layer, field)?;

        let mut values = rows
            .into_iter()
            .map(|record| data.resolve_value(&layers, record, field))
            .collect::<RepositoryResult<Vec<f64>>>()?;

        // Stable sort keeps storage order for equal values.
        values.sort_by(|a, b| a.total_cmp(b));

        debug!(
            "Fetched {} values of '{}' from layer '{}'",
            values.len(),
            field,
            query.layer
        );
        Ok(values)
    }
}
