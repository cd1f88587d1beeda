use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Internal error: `{0}`")]
    InternalError(String),

    #[error("No item type registered with name: `{0}`")]
    UnknownType(String),

    #[error("Item type `{item_type}` declares unrecognized layer type: `{layer_type}`")]
    UnrecognizedLayerType {
        item_type: String,
        layer_type: String,
    },

    #[error("Overlay item `{0}` requires a block container root, not a bare drawing surface")]
    OverlayUnsupported(String),

    #[error("Item id `{0}` appears more than once in the layout")]
    DuplicateId(String),

    #[error("Invalid props for item `{id}`: {source}")]
    InvalidProps {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid layout or configuration: {0}")]
    InvalidSpec(#[from] serde_json::Error),

    #[error("Measurement error: `{0}`")]
    Measurement(String),
}

impl ComposeError {
    /// True for errors raised while resolving or creating items. These abort a draw.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ComposeError::UnknownType(_)
                | ComposeError::UnrecognizedLayerType { .. }
                | ComposeError::OverlayUnsupported(_)
                | ComposeError::DuplicateId(_)
                | ComposeError::InvalidProps { .. }
                | ComposeError::InvalidSpec(_)
        )
    }
}
