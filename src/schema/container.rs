//! Runtime-type keyed schema registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::error::{EncodeError, EncodeResult};
use crate::schema::ResourceSchema;

type SchemaFactory = Box<dyn Fn(&SchemaContainer) -> Rc<dyn ResourceSchema>>;

enum SchemaEntry {
	Ready(Rc<dyn ResourceSchema>),
	Deferred {
		cell: OnceCell<Rc<dyn ResourceSchema>>,
		factory: SchemaFactory,
	},
}

/// Maps concrete instance types to their schemas.
///
/// Lookup is by exact [`TypeId`]; there is no fallback for related types.
/// Schemas register eagerly or through a factory closure that runs once on
/// first use and is memoized afterwards. The container is populated during
/// startup and read-only from then on.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use indexmap::IndexMap;
/// use nuages::{ResourceSchema, SchemaContainer};
/// use std::any::Any;
///
/// struct City { code: String }
/// struct CitySchema;
///
/// impl ResourceSchema for CitySchema {
/// 	fn resource_type(&self) -> &str {
/// 		"cities"
/// 	}
/// 	fn id(&self, instance: &dyn Any) -> String {
/// 		instance.downcast_ref::<City>().map(|c| c.code.clone()).unwrap_or_default()
/// 	}
/// 	fn attributes(&self, _instance: &dyn Any) -> IndexMap<String, serde_json::Value> {
/// 		IndexMap::new()
/// 	}
/// }
///
/// let mut container = SchemaContainer::new();
/// container.register::<City>(Rc::new(CitySchema));
/// let lyon = City { code: "lyon".to_owned() };
/// let schema = container.schema_for(&lyon).unwrap();
/// assert_eq!(schema.resource_type(), "cities");
/// ```
#[derive(Default)]
pub struct SchemaContainer {
	schemas: HashMap<TypeId, SchemaEntry>,
}

impl SchemaContainer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a ready schema for instances of `T`, replacing any earlier
	/// registration for the same type.
	pub fn register<T: Any>(&mut self, schema: Rc<dyn ResourceSchema>) {
		self.schemas.insert(TypeId::of::<T>(), SchemaEntry::Ready(schema));
	}

	/// Registers a lazy schema factory for instances of `T`.
	///
	/// The factory runs at most once, on the first lookup, and receives the
	/// container so it can resolve collaborating schemas. It must not look
	/// up its own type.
	pub fn register_factory<T, F>(&mut self, factory: F)
	where
		T: Any,
		F: Fn(&SchemaContainer) -> Rc<dyn ResourceSchema> + 'static,
	{
		self.schemas.insert(
			TypeId::of::<T>(),
			SchemaEntry::Deferred {
				cell: OnceCell::new(),
				factory: Box::new(factory),
			},
		);
	}

	/// Resolves the schema for the runtime type of `instance`.
	pub fn schema_for(&self, instance: &dyn Any) -> EncodeResult<Rc<dyn ResourceSchema>> {
		self.schema_by_type_id(instance.type_id())
	}

	fn schema_by_type_id(&self, type_id: TypeId) -> EncodeResult<Rc<dyn ResourceSchema>> {
		match self.schemas.get(&type_id) {
			None => Err(EncodeError::SchemaNotFound(type_id)),
			Some(SchemaEntry::Ready(schema)) => Ok(schema.clone()),
			Some(SchemaEntry::Deferred { cell, factory }) => {
				Ok(cell.get_or_init(|| factory(self)).clone())
			}
		}
	}
}
