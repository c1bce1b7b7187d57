use awb_model::RawField;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The input carries no usable value for a field the report depends on.
    #[error("required field `{field}` is missing from the input; refusing to build the report")]
    MissingRequiredField { field: RawField },
}

pub type Result<T> = std::result::Result<T, CoreError>;
