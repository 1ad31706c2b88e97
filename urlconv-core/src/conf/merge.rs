use crate::conf::types::{
    ConversionConfig, DEFAULT_BUFFER_SIZE_MULTIPLIER, DEFAULT_FROM_ENCODING, DEFAULT_TO_ENCODING,
    DocumentRoot, LocationSpec, ServerSpec, UrlConvertSpec,
};

impl UrlConvertSpec {
    /// Fill every unset field from `parent`.
    pub fn inherit(&self, parent: Option<&UrlConvertSpec>) -> UrlConvertSpec {
        let Some(parent) = parent else {
            return self.clone();
        };

        UrlConvertSpec {
            enable: self.enable.or(parent.enable),
            phase: self.phase.or(parent.phase),
            alloc_size_x: self
                .alloc_size_x
                .clone()
                .or_else(|| parent.alloc_size_x.clone()),
            alloc_size: self.alloc_size.clone().or_else(|| parent.alloc_size.clone()),
            from: self.from.clone().or_else(|| parent.from.clone()),
            to: self.to.clone().or_else(|| parent.to.clone()),
        }
    }

    /// Apply built-in defaults to whatever is still unset.
    ///
    /// Unparseable sizes resolve to 0 and unparseable multipliers to the
    /// default; validation reports both before a config is ever lowered.
    pub fn resolve(&self) -> ConversionConfig {
        ConversionConfig {
            enabled: self.enable.unwrap_or(false),
            active_phase: self.phase.unwrap_or_default(),
            buffer_size_multiplier: self
                .alloc_size_x
                .as_ref()
                .and_then(|x| x.factor().ok())
                .unwrap_or(DEFAULT_BUFFER_SIZE_MULTIPLIER),
            minimum_buffer_size: self
                .alloc_size
                .as_ref()
                .and_then(|s| s.bytes().ok())
                .unwrap_or(0),
            source_encoding: self
                .from
                .clone()
                .unwrap_or_else(|| DEFAULT_FROM_ENCODING.to_string()),
            target_encoding: self
                .to
                .clone()
                .unwrap_or_else(|| DEFAULT_TO_ENCODING.to_string()),
        }
    }
}

impl ServerSpec {
    pub fn conversion(&self) -> ConversionConfig {
        self.url_encoding_convert
            .clone()
            .unwrap_or_default()
            .resolve()
    }

    pub fn document_root(&self) -> Option<DocumentRoot> {
        self.root.clone().map(DocumentRoot::Root)
    }
}

impl LocationSpec {
    pub fn conversion(&self, server: &ServerSpec) -> ConversionConfig {
        self.url_encoding_convert
            .clone()
            .unwrap_or_default()
            .inherit(server.url_encoding_convert.as_ref())
            .resolve()
    }

    /// `alias` beats `root`; with neither, the server root applies.
    pub fn document_root(&self, server: &ServerSpec) -> Option<DocumentRoot> {
        if let Some(dir) = &self.alias {
            return Some(DocumentRoot::Alias {
                prefix: self.path.clone(),
                dir: dir.clone(),
            });
        }

        self.root
            .clone()
            .map(DocumentRoot::Root)
            .or_else(|| server.document_root())
    }
}
