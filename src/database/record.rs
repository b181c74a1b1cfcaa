use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identity field exposed to clients; assigned by storage, never accepted from input
pub const ID_FIELD: &str = "_id";
pub const CODIGO_PRODUCTO: &str = "codigoProducto";
pub const DESCRIPCION: &str = "descripcion";
pub const PRECIO_BASE: &str = "precioBase";
pub const ID_ETIQUETA: &str = "idEtiqueta";

/// A product document as stored: every client field except the identity field
pub type Document = Map<String, Value>;

/// Errors that can occur while validating product input
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Se esperaba un objeto JSON.")]
    NotAnObject,
    #[error("Faltan campos requeridos o el precioBase no es un número.")]
    MissingRequiredFields,
    #[error("El campo '{0}' debe ser un texto no vacío.")]
    InvalidText(&'static str),
    #[error("El campo 'precioBase' debe ser un número.")]
    InvalidPrice,
}

fn into_object(json: Value) -> Result<Document, RecordError> {
    match json {
        Value::Object(map) => Ok(map),
        _ => Err(RecordError::NotAnObject),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Validated input for the create operation
#[derive(Debug, Clone)]
pub struct NewProduct {
    codigo: String,
    document: Document,
}

impl NewProduct {
    /// Requires `codigoProducto`, `descripcion` and a numeric `precioBase`.
    /// A client-supplied `_id` is dropped.
    pub fn from_json(json: Value) -> Result<Self, RecordError> {
        let mut document = into_object(json)?;
        document.remove(ID_FIELD);

        let codigo = non_empty_str(document.get(CODIGO_PRODUCTO))
            .ok_or(RecordError::MissingRequiredFields)?
            .to_string();
        non_empty_str(document.get(DESCRIPCION)).ok_or(RecordError::MissingRequiredFields)?;
        if !document.get(PRECIO_BASE).is_some_and(Value::is_number) {
            return Err(RecordError::MissingRequiredFields);
        }

        Ok(Self { codigo, document })
    }

    pub fn codigo(&self) -> &str {
        &self.codigo
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Partial update payload with the identity field and business key removed
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    fields: Document,
}

impl ProductPatch {
    pub fn from_json(json: Value) -> Result<Self, RecordError> {
        let mut fields = into_object(json)?;
        fields.remove(ID_FIELD);
        fields.remove(CODIGO_PRODUCTO);

        if fields.get(PRECIO_BASE).is_some_and(|v| !v.is_number()) {
            return Err(RecordError::InvalidPrice);
        }
        if let Some(descripcion) = fields.get(DESCRIPCION) {
            if non_empty_str(Some(descripcion)).is_none() {
                return Err(RecordError::InvalidText(DESCRIPCION));
            }
        }

        Ok(Self { fields })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    /// Top-level field merge. Returns whether the document actually changed.
    pub fn apply_to(&self, document: &mut Document) -> bool {
        let mut changed = false;
        for (key, value) in &self.fields {
            if !document.get(key).is_some_and(|current| json_equal(current, value)) {
                document.insert(key.clone(), value.clone());
                changed = true;
            }
        }
        changed
    }
}

/// Equality as jsonb sees it: numbers compare by value, so `12` equals `12.0`
fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}

/// A product document together with its storage-assigned identity
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProduct {
    pub id: Uuid,
    pub document: Document,
}

impl StoredProduct {
    pub fn codigo(&self) -> Option<&str> {
        self.document.get(CODIGO_PRODUCTO).and_then(Value::as_str)
    }

    /// Label identifier present and not null
    pub fn has_label(&self) -> bool {
        !matches!(self.document.get(ID_ETIQUETA), None | Some(Value::Null))
    }

    /// Admin view: the full document plus `_id`
    pub fn to_api_output(&self) -> Value {
        let mut output = self.document.clone();
        output.insert(ID_FIELD.to_string(), Value::String(self.id.to_string()));
        Value::Object(output)
    }

    pub fn to_api_output_array(products: &[StoredProduct]) -> Vec<Value> {
        products.iter().map(StoredProduct::to_api_output).collect()
    }
}

/// Public projection consumed by label devices; never carries `_id`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_producto: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_etiqueta: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_base: Option<Value>,
}

impl From<&StoredProduct> for LabelEntry {
    fn from(product: &StoredProduct) -> Self {
        let field = |name: &str| product.document.get(name).cloned();
        Self {
            codigo_producto: field(CODIGO_PRODUCTO),
            descripcion: field(DESCRIPCION),
            id_etiqueta: field(ID_ETIQUETA),
            precio_base: field(PRECIO_BASE),
        }
    }
}
