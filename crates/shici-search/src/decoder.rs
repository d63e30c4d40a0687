//! Per-document-type decoders for engine envelopes, built once and cached.
//!
//! The hit and document envelopes are generic over the document type. A
//! decoder for type `T` is built ("synthesized") on first use: the type's
//! declared schema is validated and a monomorphized decoder is stored, keyed
//! by `TypeId`. Later lookups return the stored decoder.

use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shici_core::document::{Searchable, analyzed_field_names, validate_schema};
use shici_transport::TransportError;
use tracing::debug;

use crate::envelope::{DocumentEnvelope, Hit, HitsEnvelope, RawHit, RawSearchResponse};
use crate::error::SearchError;
use crate::response::parse_body;

type ErasedDecoder = Arc<dyn Any + Send + Sync>;

/// Decodes search responses for document type `T`.
#[derive(Debug)]
pub struct HitsDecoder<T> {
    type_name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Searchable> HitsDecoder<T> {
    fn synthesize() -> Result<Self, SearchError> {
        validate_schema::<T>()?;
        Ok(Self {
            type_name: T::TYPE_NAME,
            _marker: PhantomData,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Read the envelope (total and raw hits) without touching any source.
    pub fn decode_envelope(&self, body: &str) -> Result<RawSearchResponse, SearchError> {
        parse_body(body)
    }

    /// Decode one hit's source into `T`.
    pub fn decode_hit(&self, hit: RawHit) -> Result<Hit<T>, SearchError> {
        let source = hit.source.ok_or_else(|| {
            TransportError::MalformedResponse(format!("{} hit without _source", self.type_name))
        })?;
        let document = serde_json::from_value(source).map_err(|e| {
            TransportError::MalformedResponse(format!("{} hit: {e}", self.type_name))
        })?;
        Ok(Hit {
            id: hit.id,
            score: hit.score,
            document,
        })
    }

    /// Decode the envelope and every hit.
    pub fn decode(&self, body: &str) -> Result<HitsEnvelope<T>, SearchError> {
        let raw = self.decode_envelope(body)?;
        let total = raw.total();
        let hits = raw
            .hits
            .hits
            .into_iter()
            .map(|hit| self.decode_hit(hit))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HitsEnvelope { total, hits })
    }
}

/// Decodes single-document GET responses for document type `T`.
pub struct DocumentDecoder<T> {
    type_name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Searchable> DocumentDecoder<T> {
    fn synthesize() -> Result<Self, SearchError> {
        validate_schema::<T>()?;
        Ok(Self {
            type_name: T::TYPE_NAME,
            _marker: PhantomData,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Decode the document with id `id` from a GET response body.
    pub fn decode(&self, body: &str, id: &str) -> Result<T, SearchError> {
        let envelope: DocumentEnvelope<T> = parse_body(body)?;
        match envelope {
            DocumentEnvelope {
                found: Some(false), ..
            }
            | DocumentEnvelope { source: None, .. } => {
                Err(SearchError::DocumentNotFound(format!("{}/{id}", self.type_name)))
            }
            DocumentEnvelope {
                source: Some(doc), ..
            } => Ok(doc),
        }
    }
}

/// Process-wide decoder caches, one per envelope shape, plus the
/// analyzed-field lookup.
///
/// Build one at startup and share it (the `Searcher` holds it in an `Arc`).
/// Lookup and insert for a key happen under one shard lock, so concurrent
/// first use of a type stores exactly one decoder.
#[derive(Default)]
pub struct DecoderRegistry {
    hits: DashMap<TypeId, ErasedDecoder>,
    documents: DashMap<TypeId, ErasedDecoder>,
    analyzed_fields: DashMap<TypeId, Arc<[&'static str]>>,
    synthesized: AtomicUsize,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits_decoder<T: Searchable>(&self) -> Result<Arc<HitsDecoder<T>>, SearchError> {
        self.get_or_synthesize(&self.hits, TypeId::of::<T>(), HitsDecoder::<T>::synthesize)
    }

    pub fn document_decoder<T: Searchable>(
        &self,
    ) -> Result<Arc<DocumentDecoder<T>>, SearchError> {
        self.get_or_synthesize(
            &self.documents,
            TypeId::of::<T>(),
            DocumentDecoder::<T>::synthesize,
        )
    }

    /// Names of `T`'s analyzed fields.
    pub fn analyzed_fields<T: Searchable>(&self) -> Arc<[&'static str]> {
        self.analyzed_fields
            .entry(TypeId::of::<T>())
            .or_insert_with(|| analyzed_field_names::<T>().into())
            .clone()
    }

    /// Decoders built so far, across both shapes.
    pub fn synthesis_count(&self) -> usize {
        self.synthesized.load(Ordering::Acquire)
    }

    fn get_or_synthesize<D, F>(
        &self,
        cache: &DashMap<TypeId, ErasedDecoder>,
        key: TypeId,
        synthesize: F,
    ) -> Result<Arc<D>, SearchError>
    where
        D: Any + Send + Sync,
        F: FnOnce() -> Result<D, SearchError>,
    {
        let erased = match cache.entry(key) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let decoder: ErasedDecoder = Arc::new(synthesize()?);
                self.synthesized.fetch_add(1, Ordering::AcqRel);
                debug!(decoder = std::any::type_name::<D>(), "synthesized decoder");
                entry.insert(Arc::clone(&decoder));
                decoder
            }
        };

        erased.downcast::<D>().map_err(|_| {
            SearchError::Config(format!(
                "decoder cache holds the wrong type for {}",
                std::any::type_name::<D>()
            ))
        })
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("hits", &self.hits.len())
            .field("documents", &self.documents.len())
            .field("synthesized", &self.synthesis_count())
            .finish()
    }
}
