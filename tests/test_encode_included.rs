//! Included resources: include paths, sparse field sets, cycles and
//! reference links.

mod common;

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::{Value, json};

use common::{
	Author, AuthorSchema, Comment, CommentSchema, Post, PostSchema, Site, SiteSchema,
	default_container, fixtures,
};
use nuages::{
	Encoder, EncodingParameters, PaginationLinks, RelationshipObject, ResourceData,
	ResourceSchema, SchemaContainer,
};

#[test]
fn test_encode_with_included_objects() {
	let fixtures = fixtures();
	let mut container = SchemaContainer::new();
	container.register::<Author>(Rc::new(AuthorSchema::default()));
	container.register::<Comment>(Rc::new(CommentSchema { hide_author: true }));
	container.register::<Post>(Rc::new(PostSchema {
		include_paths: vec!["comments".to_owned()],
		..PostSchema::default()
	}));

	let document = Encoder::new(Rc::new(container))
		.encode(&ResourceData::One(fixtures.post.clone()), None, None, None)
		.unwrap();

	assert_eq!(
		document,
		json!({
			"data": {
				"type": "posts",
				"id": "1",
				"attributes": {
					"title": "JSON API paints my bikeshed!",
					"body": "Outside every fat man there was an even fatter man trying to close in"
				},
				"relationships": {
					"author": {
						"data": { "type": "people", "id": "9" }
					},
					"comments": {
						"data": [
							{ "type": "comments", "id": "5" },
							{ "type": "comments", "id": "12" }
						]
					}
				},
				"links": { "self": "http://example.com/posts/1" }
			},
			"included": [
				{
					"type": "comments",
					"id": "5",
					"attributes": { "body": "First!" },
					"links": { "self": "http://example.com/comments/5" }
				},
				{
					"type": "comments",
					"id": "12",
					"attributes": { "body": "I like XML better" },
					"links": { "self": "http://example.com/comments/12" }
				}
			]
		})
	);
}

#[test]
fn test_encode_with_recursive_included_objects_and_sparse_fields() {
	let fixtures = fixtures();
	// close the cycle: author links back to the comments
	*fixtures.author.comments.borrow_mut() = fixtures.comments.clone();

	let mut field_sets = HashMap::new();
	field_sets.insert(
		"comments".to_owned(),
		HashSet::from(["body".to_owned(), "author".to_owned()]),
	);
	field_sets.insert("sites".to_owned(), HashSet::from(["posts".to_owned()]));
	let parameters = EncodingParameters::new(
		Some(vec!["posts.comments".to_owned()]),
		Some(field_sets),
	);

	let document = Encoder::new(Rc::new(default_container()))
		.encode(
			&ResourceData::One(fixtures.site.clone()),
			None,
			None,
			Some(&parameters),
		)
		.unwrap();

	assert_eq!(
		document,
		json!({
			"data": {
				"type": "sites",
				"id": "2",
				"relationships": {
					"posts": {
						"data": { "type": "posts", "id": "1" }
					}
				},
				"links": { "self": "http://example.com/sites/2" }
			},
			"included": [
				{
					"type": "comments",
					"id": "5",
					"attributes": { "body": "First!" },
					"relationships": {
						"author": {
							"data": { "type": "people", "id": "9" }
						}
					},
					"links": { "self": "http://example.com/comments/5" }
				},
				{
					"type": "comments",
					"id": "12",
					"attributes": { "body": "I like XML better" },
					"relationships": {
						"author": {
							"data": { "type": "people", "id": "9" }
						}
					},
					"links": { "self": "http://example.com/comments/12" }
				}
			]
		})
	);
}

#[test]
fn test_encode_with_null_and_empty_relationships() {
	let fixtures = fixtures();
	*fixtures.post.author.borrow_mut() = None;
	fixtures.post.comments.borrow_mut().clear();

	let document = Encoder::new(Rc::new(default_container()))
		.encode(&ResourceData::One(fixtures.site.clone()), None, None, None)
		.unwrap();

	assert_eq!(
		document,
		json!({
			"data": {
				"type": "sites",
				"id": "2",
				"attributes": { "name": "site name" },
				"relationships": {
					"posts": {
						"data": { "type": "posts", "id": "1" }
					}
				},
				"links": { "self": "http://example.com/sites/2" }
			},
			"included": [
				{
					"type": "posts",
					"id": "1",
					"attributes": {
						"title": "JSON API paints my bikeshed!",
						"body": "Outside every fat man there was an even fatter man trying to close in"
					},
					"relationships": {
						"author": { "data": null },
						"comments": { "data": [] }
					}
				}
			]
		})
	);
}

#[test]
fn test_encode_duplicates_with_cyclic_references() {
	let fixtures = fixtures();
	fixtures.post.comments.borrow_mut().clear();
	// point the author relationship back at the post itself
	*fixtures.post.author.borrow_mut() = Some(fixtures.post.clone() as Rc<dyn Any>);

	let document = Encoder::new(Rc::new(default_container()))
		.encode(&ResourceData::One(fixtures.site.clone()), None, None, None)
		.unwrap();

	let included = document["included"].as_array().unwrap();
	assert_eq!(included.len(), 1);
	assert_eq!(
		included[0]["relationships"],
		json!({
			"author": {
				"data": { "type": "posts", "id": "1" }
			},
			"comments": { "data": [] }
		})
	);
}

#[test]
fn test_encode_relationships_as_references() {
	let fixtures = fixtures();
	let mut container = SchemaContainer::new();
	container.register::<Author>(Rc::new(AuthorSchema::default()));
	container.register::<Comment>(Rc::new(CommentSchema::default()));
	container.register::<Post>(Rc::new(PostSchema {
		as_references: true,
		..PostSchema::default()
	}));
	container.register::<Site>(Rc::new(SiteSchema::default()));

	let document = Encoder::new(Rc::new(container))
		.encode(&ResourceData::One(fixtures.site.clone()), None, None, None)
		.unwrap();

	assert_eq!(
		document["included"][0]["relationships"],
		json!({
			"author": "http://example.com/posts/1/author",
			"comments": "http://example.com/posts/1/comments"
		})
	);
}

#[test]
fn test_descent_stops_at_the_last_requested_segment() {
	let fixtures = fixtures();

	let document = Encoder::new(Rc::new(default_container()))
		.encode(&ResourceData::One(fixtures.site.clone()), None, None, None)
		.unwrap();

	// 'posts' is the only requested path: the post is included with full
	// relationship linkage, but the linked author and comments are not
	let included = document["included"].as_array().unwrap();
	assert_eq!(included.len(), 1);
	assert_eq!(included[0]["type"], "posts");
	assert_eq!(
		included[0]["relationships"],
		json!({
			"author": {
				"data": { "type": "people", "id": "9" }
			},
			"comments": {
				"data": [
					{ "type": "comments", "id": "5" },
					{ "type": "comments", "id": "12" }
				]
			}
		})
	);
}

#[test]
fn test_encode_relationship_with_pagination() {
	let fixtures = fixtures();
	let mut container = SchemaContainer::new();
	container.register::<Author>(Rc::new(AuthorSchema::default()));
	container.register::<Comment>(Rc::new(CommentSchema::default()));
	container.register::<Post>(Rc::new(PostSchema {
		comments_pagination: Some(PaginationLinks::new(
			Some("/first".to_owned()),
			None,
			None,
			None,
		)),
		..PostSchema::default()
	}));

	let document = Encoder::new(Rc::new(container))
		.encode(&ResourceData::One(fixtures.post.clone()), None, None, None)
		.unwrap();

	assert_eq!(
		document,
		json!({
			"data": {
				"type": "posts",
				"id": "1",
				"attributes": {
					"title": "JSON API paints my bikeshed!",
					"body": "Outside every fat man there was an even fatter man trying to close in"
				},
				"relationships": {
					"author": {
						"data": { "type": "people", "id": "9" }
					},
					"comments": {
						"data": [
							{ "type": "comments", "id": "5" },
							{ "type": "comments", "id": "12" }
						],
						"links": { "first": "/first" }
					}
				},
				"links": { "self": "http://example.com/posts/1" }
			}
		})
	);
}

#[test]
fn test_relationship_self_and_related_links_with_pagination() {
	let fixtures = fixtures();
	let mut container = SchemaContainer::new();
	container.register::<Author>(Rc::new(AuthorSchema::default()));
	container.register::<Comment>(Rc::new(CommentSchema::default()));
	container.register::<Post>(Rc::new(PostSchema {
		show_relationship_links: true,
		comments_pagination: Some(PaginationLinks::new(
			Some("/first".to_owned()),
			None,
			None,
			None,
		)),
		..PostSchema::default()
	}));

	let document = Encoder::new(Rc::new(container))
		.encode(&ResourceData::One(fixtures.post.clone()), None, None, None)
		.unwrap();

	let relationships = &document["data"]["relationships"];
	assert_eq!(
		relationships["author"],
		json!({
			"links": {
				"self": "http://example.com/posts/1/relationships/author",
				"related": "http://example.com/posts/1/author"
			},
			"data": { "type": "people", "id": "9" }
		})
	);
	assert_eq!(
		relationships["comments"],
		json!({
			"links": {
				"self": "http://example.com/posts/1/relationships/comments",
				"related": "http://example.com/posts/1/comments",
				"first": "/first"
			},
			"data": [
				{ "type": "comments", "id": "5" },
				{ "type": "comments", "id": "12" }
			]
		})
	);
}

struct ProfiledAuthorSchema;

impl ResourceSchema for ProfiledAuthorSchema {
	fn resource_type(&self) -> &str {
		"people"
	}

	fn id(&self, instance: &dyn Any) -> String {
		instance.downcast_ref::<Author>().unwrap().id.to_string()
	}

	fn attributes(&self, _instance: &dyn Any) -> IndexMap<String, Value> {
		IndexMap::new()
	}

	fn meta(&self, _instance: &dyn Any) -> Option<Value> {
		Some(json!({ "role": "writer" }))
	}
}

struct AnnotatedCommentSchema {
	explicit_meta: bool,
}

impl ResourceSchema for AnnotatedCommentSchema {
	fn resource_type(&self) -> &str {
		"comments"
	}

	fn id(&self, instance: &dyn Any) -> String {
		instance.downcast_ref::<Comment>().unwrap().id.to_string()
	}

	fn attributes(&self, _instance: &dyn Any) -> IndexMap<String, Value> {
		IndexMap::new()
	}

	fn relationships(&self, instance: &dyn Any) -> Vec<RelationshipObject> {
		let comment = instance.downcast_ref::<Comment>().unwrap();
		let author = RelationshipObject::new(
			"author",
			ResourceData::One(comment.author.clone() as Rc<dyn Any>),
		);
		if self.explicit_meta {
			vec![author.with_meta(json!({ "note": "pinned" }))]
		} else {
			vec![author.with_target_meta()]
		}
	}
}

#[test]
fn test_relationship_meta_comes_from_the_target_resource() {
	let fixtures = fixtures();
	let mut container = SchemaContainer::new();
	container.register::<Author>(Rc::new(ProfiledAuthorSchema));
	container.register::<Comment>(Rc::new(AnnotatedCommentSchema { explicit_meta: false }));

	let document = Encoder::new(Rc::new(container))
		.encode(
			&ResourceData::One(fixtures.comments[0].clone()),
			None,
			None,
			None,
		)
		.unwrap();

	assert_eq!(
		document["data"]["relationships"]["author"],
		json!({
			"data": { "type": "people", "id": "9" },
			"meta": { "role": "writer" }
		})
	);
}

#[test]
fn test_explicit_relationship_meta_wins_over_target_meta() {
	let fixtures = fixtures();
	let mut container = SchemaContainer::new();
	container.register::<Author>(Rc::new(ProfiledAuthorSchema));
	container.register::<Comment>(Rc::new(AnnotatedCommentSchema { explicit_meta: true }));

	let document = Encoder::new(Rc::new(container))
		.encode(
			&ResourceData::One(fixtures.comments[0].clone()),
			None,
			None,
			None,
		)
		.unwrap();

	assert_eq!(
		document["data"]["relationships"]["author"]["meta"],
		json!({ "note": "pinned" })
	);
}

#[test]
fn test_cyclic_graph_terminates_and_includes_once() {
	let fixtures = fixtures();
	*fixtures.author.comments.borrow_mut() = fixtures.comments.clone();

	let parameters = EncodingParameters::with_include_paths([
		"comments",
		"comments.author",
		"comments.author.comments",
	]);
	let document = Encoder::new(Rc::new(default_container()))
		.encode(
			&ResourceData::One(fixtures.post.clone()),
			None,
			None,
			Some(&parameters),
		)
		.unwrap();

	let included = document["included"].as_array().unwrap();
	// two comments and one author, each exactly once
	assert_eq!(included.len(), 3);
	let mut seen: Vec<(String, String)> = included
		.iter()
		.map(|resource| {
			(
				resource["type"].as_str().unwrap().to_owned(),
				resource["id"].as_str().unwrap().to_owned(),
			)
		})
		.collect();
	seen.sort();
	assert_eq!(
		seen,
		[
			("comments".to_owned(), "12".to_owned()),
			("comments".to_owned(), "5".to_owned()),
			("people".to_owned(), "9".to_owned()),
		]
	);
}
