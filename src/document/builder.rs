//! Recursive document assembly.
//!
//! The builder walks the object graph starting from the root data, resolves
//! every reached instance through its schema into an arena of resource
//! records and renders the arena into the final document tree. A resolved
//! set keyed by `(type, id)` is the sole dedup and cycle-breaking mechanism:
//! a pair is resolved at most once and later occurrences only contribute
//! linkage entries.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{Map, Value, json};
use tracing::{debug, trace};

use crate::document::links::{DocumentLinks, PaginationLinks};
use crate::error::{EncodeError, EncodeResult};
use crate::parameters::EncodingParameters;
use crate::schema::relationship::ResourceData;
use crate::schema::resource::ResourceObject;
use crate::schema::SchemaContainer;

/// Joins a URL and a sub-URL with exactly one `/` between them.
pub(crate) fn concat_urls(url: &str, sub_url: &str) -> String {
	let url_ends_with_slash = url.ends_with('/');
	let sub_starts_with_slash = sub_url.starts_with('/');
	match (url_ends_with_slash, sub_starts_with_slash) {
		(false, false) => format!("{url}/{sub_url}"),
		(true, true) => format!("{}{}", url.trim_end_matches('/'), sub_url),
		_ => format!("{url}{sub_url}"),
	}
}

struct ResourceRecord {
	resource: ResourceObject,
	relationships: Vec<RelationshipRendition>,
}

enum RelationshipRendition {
	/// The whole relationship rendered as a bare related URL.
	Reference { name: String, url: String },
	Object { name: String, view: RelationshipView },
}

#[derive(Default)]
struct RelationshipView {
	self_url: Option<String>,
	related_url: Option<String>,
	linkage: Option<Linkage>,
	meta: Option<Value>,
	pagination: Option<PaginationLinks>,
}

enum Linkage {
	Null,
	Many(Vec<LinkageRecord>),
}

struct LinkageRecord {
	resource_type: String,
	id: String,
	meta: Option<Value>,
}

/// One-shot traversal state for a single encode call.
pub(crate) struct DocumentBuilder<'a> {
	container: &'a SchemaContainer,
	parameters: Option<&'a EncodingParameters>,
	arena: Vec<ResourceRecord>,
	resolved: HashMap<(String, String), usize>,
	primary: Vec<usize>,
	included: Vec<usize>,
	requested: Vec<String>,
	include_cache: HashMap<String, bool>,
	descend_cache: HashMap<String, bool>,
}

impl<'a> DocumentBuilder<'a> {
	pub(crate) fn new(
		container: &'a SchemaContainer,
		parameters: Option<&'a EncodingParameters>,
	) -> Self {
		Self {
			container,
			parameters,
			arena: Vec::new(),
			resolved: HashMap::new(),
			primary: Vec::new(),
			included: Vec::new(),
			requested: Vec::new(),
			include_cache: HashMap::new(),
			descend_cache: HashMap::new(),
		}
	}

	/// Resolves `data` and renders the full document.
	///
	/// Top-level keys come out as `data`, `included`, `meta`, `links`; only
	/// `data` is always present.
	pub(crate) fn build(
		mut self,
		data: &ResourceData,
		links: Option<&DocumentLinks>,
		meta: Option<&Value>,
	) -> EncodeResult<Value> {
		let data_value = match data {
			ResourceData::Null => Value::Null,
			ResourceData::Many(instances) if instances.is_empty() => Value::Array(Vec::new()),
			_ => {
				for instance in data.instances() {
					self.resolve_root(&instance)?;
				}
				let rendered: Vec<Value> =
					self.primary.iter().map(|&idx| self.render_primary(idx)).collect();
				match data {
					ResourceData::One(_) => rendered.into_iter().next().unwrap_or(Value::Null),
					_ => Value::Array(rendered),
				}
			}
		};
		debug!(
			resolved = self.arena.len(),
			included = self.included.len(),
			"document traversal finished"
		);

		let mut document = Map::new();
		document.insert("data".to_owned(), data_value);
		if !self.included.is_empty() {
			let rendered: Vec<Value> =
				self.included.iter().map(|&idx| self.render_included(idx)).collect();
			document.insert("included".to_owned(), Value::Array(rendered));
		}
		if let Some(meta) = meta {
			document.insert("meta".to_owned(), meta.clone());
		}
		if let Some(links) = links {
			if let Some(rendered) = links.render() {
				document.insert("links".to_owned(), rendered);
			}
		}
		Ok(Value::Object(document))
	}

	fn resolve_root(&mut self, instance: &Rc<dyn Any>) -> EncodeResult<()> {
		let schema = self.container.schema_for(instance.as_ref())?;
		self.requested = match self.parameters.and_then(EncodingParameters::include_paths) {
			Some(paths) => paths.to_vec(),
			None => {
				// per-root defaults invalidate the previous root's caches
				self.include_cache.clear();
				self.descend_cache.clear();
				schema.default_include_paths()
			}
		};
		let idx = self.resolve(instance, "")?;
		self.primary.push(idx);
		Ok(())
	}

	/// Resolves one instance reached through relationship chain `path`
	/// (empty for roots) and returns its arena index.
	fn resolve(&mut self, instance: &Rc<dyn Any>, path: &str) -> EncodeResult<usize> {
		let schema = self.container.schema_for(instance.as_ref())?;
		let mut resource = ResourceObject::from_schema(schema.as_ref(), instance.as_ref())?;

		let key = (resource.resource_type().to_owned(), resource.id().to_owned());
		if let Some(&idx) = self.resolved.get(&key) {
			trace!(resource_type = %key.0, id = %key.1, "already resolved");
			return Ok(idx);
		}
		trace!(resource_type = %key.0, id = %key.1, %path, "resolving");

		let field_set = self
			.parameters
			.and_then(|parameters| parameters.field_set(resource.resource_type()))
			.cloned();
		if let Some(fields) = &field_set {
			resource.retain_fields(fields);
		}

		let parent_self_url = resource.self_url().to_owned();
		let idx = self.arena.len();
		self.arena.push(ResourceRecord { resource, relationships: Vec::new() });
		self.resolved.insert(key, idx);
		// only an exactly requested path puts a resource into 'included';
		// reaching it through a prefix means traversal only
		if !path.is_empty() && self.is_requested_path(path) {
			self.included.push(idx);
		}

		let mut renditions = Vec::new();
		for relationship in schema.relationships(instance.as_ref()) {
			let name = relationship.name().to_owned();
			if let Some(fields) = &field_set {
				if !fields.contains(&name) {
					continue;
				}
			}
			if name.is_empty() || name == "self" {
				return Err(EncodeError::ReservedRelationshipName(name));
			}
			if !relationship.show_as_reference()
				&& !(relationship.show_self()
					|| relationship.show_related()
					|| relationship.show_data()
					|| relationship.show_meta())
			{
				return Err(EncodeError::EmptyRelationshipContract(name));
			}

			if relationship.show_as_reference() {
				let url = concat_urls(&parent_self_url, &relationship.related_sub_url());
				renditions.push(RelationshipRendition::Reference { name, url });
				continue;
			}

			let mut view = RelationshipView::default();
			if relationship.show_self() {
				view.self_url =
					Some(concat_urls(&parent_self_url, &relationship.self_sub_url()));
			}
			if relationship.show_related() {
				view.related_url =
					Some(concat_urls(&parent_self_url, &relationship.related_sub_url()));
			}
			if relationship.show_data() {
				view.linkage = Some(match relationship.data() {
					ResourceData::Null => Linkage::Null,
					data => {
						let mut records = Vec::new();
						for target in data.instances() {
							records.push(self.linkage_record(target.as_ref())?);
						}
						Linkage::Many(records)
					}
				});
			}
			if relationship.show_meta() {
				view.meta = match relationship.meta() {
					Some(meta) => Some(meta.clone()),
					// no explicit value: surface the first target's meta
					None => match relationship.data().instances().first() {
						Some(target) => self
							.container
							.schema_for(target.as_ref())?
							.meta(target.as_ref()),
						None => None,
					},
				};
			}
			if relationship.show_pagination() {
				view.pagination = relationship.pagination().cloned();
			}

			let child_path = if path.is_empty() {
				name.clone()
			} else {
				format!("{path}.{name}")
			};
			if !relationship.data().is_null() && self.should_descend(&child_path) {
				for target in relationship.data().instances() {
					self.resolve(&target, &child_path)?;
				}
			}

			renditions.push(RelationshipRendition::Object { name, view });
		}
		self.arena[idx].relationships = renditions;
		Ok(idx)
	}

	fn linkage_record(&self, target: &dyn Any) -> EncodeResult<LinkageRecord> {
		let schema = self.container.schema_for(target)?;
		let meta = if schema.show_meta_in_linkage() {
			schema.meta(target)
		} else {
			None
		};
		Ok(LinkageRecord {
			resource_type: schema.resource_type().to_owned(),
			id: schema.id(target),
			meta,
		})
	}

	/// Whether `path` is exactly one of the requested include paths.
	fn is_requested_path(&mut self, path: &str) -> bool {
		if let Some(&cached) = self.include_cache.get(path) {
			return cached;
		}
		let result = self.requested.iter().any(|requested| requested == path);
		self.include_cache.insert(path.to_owned(), result);
		result
	}

	/// Whether `path` is a requested path or a dot-boundary prefix of one.
	fn should_descend(&mut self, path: &str) -> bool {
		if let Some(&cached) = self.descend_cache.get(path) {
			return cached;
		}
		let result = self.requested.iter().any(|requested| {
			requested == path
				|| (requested.starts_with(path)
					&& requested.as_bytes().get(path.len()) == Some(&b'.'))
		});
		self.descend_cache.insert(path.to_owned(), result);
		result
	}

	fn render_primary(&self, idx: usize) -> Value {
		let record = &self.arena[idx];
		self.render_record(
			record,
			record.resource.show_self(),
			record.resource.show_meta(),
			true,
		)
	}

	fn render_included(&self, idx: usize) -> Value {
		let record = &self.arena[idx];
		self.render_record(
			record,
			record.resource.show_self_in_included(),
			record.resource.show_meta_in_included(),
			record.resource.show_relationships_in_included(),
		)
	}

	fn render_record(
		&self,
		record: &ResourceRecord,
		show_self: bool,
		show_meta: bool,
		show_relationships: bool,
	) -> Value {
		let resource = &record.resource;
		let mut object = Map::new();
		object.insert("type".to_owned(), Value::String(resource.resource_type().to_owned()));
		object.insert("id".to_owned(), Value::String(resource.id().to_owned()));
		if !resource.attributes().is_empty() {
			let attributes: Map<String, Value> = resource
				.attributes()
				.iter()
				.map(|(name, value)| (name.clone(), value.clone()))
				.collect();
			object.insert("attributes".to_owned(), Value::Object(attributes));
		}
		if show_relationships && !record.relationships.is_empty() {
			object.insert(
				"relationships".to_owned(),
				render_relationships(&record.relationships),
			);
		}
		if show_self {
			object.insert("links".to_owned(), json!({ "self": resource.self_url() }));
		}
		if show_meta {
			if let Some(meta) = resource.meta() {
				object.insert("meta".to_owned(), meta.clone());
			}
		}
		Value::Object(object)
	}
}

fn render_relationships(renditions: &[RelationshipRendition]) -> Value {
	let mut object = Map::new();
	for rendition in renditions {
		match rendition {
			RelationshipRendition::Reference { name, url } => {
				object.insert(name.clone(), Value::String(url.clone()));
			}
			RelationshipRendition::Object { name, view } => {
				object.insert(name.clone(), render_relationship_view(view));
			}
		}
	}
	Value::Object(object)
}

fn render_relationship_view(view: &RelationshipView) -> Value {
	let mut object = Map::new();

	let mut links = Map::new();
	if let Some(url) = &view.self_url {
		links.insert("self".to_owned(), Value::String(url.clone()));
	}
	if let Some(url) = &view.related_url {
		links.insert("related".to_owned(), Value::String(url.clone()));
	}
	if let Some(pagination) = &view.pagination {
		// pagination merges in additively, self/related always win
		pagination.render_into(&mut links);
	}
	if !links.is_empty() {
		object.insert("links".to_owned(), Value::Object(links));
	}

	if let Some(linkage) = &view.linkage {
		object.insert("data".to_owned(), render_linkage(linkage));
	}
	if let Some(meta) = &view.meta {
		object.insert("meta".to_owned(), meta.clone());
	}
	Value::Object(object)
}

fn render_linkage(linkage: &Linkage) -> Value {
	match linkage {
		Linkage::Null => Value::Null,
		// a single linkage entry collapses to a scalar record
		Linkage::Many(records) if records.len() == 1 => render_linkage_record(&records[0]),
		Linkage::Many(records) => {
			Value::Array(records.iter().map(render_linkage_record).collect())
		}
	}
}

fn render_linkage_record(record: &LinkageRecord) -> Value {
	let mut object = Map::new();
	object.insert("type".to_owned(), Value::String(record.resource_type.clone()));
	object.insert("id".to_owned(), Value::String(record.id.clone()));
	if let Some(meta) = &record.meta {
		object.insert("meta".to_owned(), meta.clone());
	}
	Value::Object(object)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_concat_urls_normalizes_to_one_slash() {
		assert_eq!(concat_urls("http://x.com/a", "b"), "http://x.com/a/b");
		assert_eq!(concat_urls("http://x.com/a/", "b"), "http://x.com/a/b");
		assert_eq!(concat_urls("http://x.com/a", "/b"), "http://x.com/a/b");
		assert_eq!(concat_urls("http://x.com/a/", "/b"), "http://x.com/a/b");
	}
}
