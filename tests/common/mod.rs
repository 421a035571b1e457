//! Shared fixture graph: authors, comments, posts and sites.
//!
//! The schemas carry small switches (hide a relationship, render links as
//! references, attach pagination) so individual tests can reshape the
//! output without redefining whole schemas.

#![allow(dead_code)]

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::{Value, json};

use nuages::{
	PaginationLinks, RelationshipObject, ResourceData, ResourceSchema, SchemaContainer,
};

pub struct Author {
	pub id: u64,
	pub first_name: String,
	pub last_name: String,
	pub comments: RefCell<Vec<Rc<Comment>>>,
}

pub struct Comment {
	pub id: u64,
	pub body: String,
	pub author: Rc<Author>,
}

pub struct Post {
	pub id: u64,
	pub title: String,
	pub body: String,
	/// Type-erased so tests can point it at arbitrary resources.
	pub author: RefCell<Option<Rc<dyn Any>>>,
	pub comments: RefCell<Vec<Rc<Comment>>>,
}

pub struct Site {
	pub id: u64,
	pub name: String,
	pub posts: Vec<Rc<Post>>,
}

pub struct Fixtures {
	pub author: Rc<Author>,
	pub comments: Vec<Rc<Comment>>,
	pub post: Rc<Post>,
	pub site: Rc<Site>,
}

pub fn author() -> Rc<Author> {
	Rc::new(Author {
		id: 9,
		first_name: "Dan".to_owned(),
		last_name: "Gebhardt".to_owned(),
		comments: RefCell::new(Vec::new()),
	})
}

/// The full development graph: one author, two comments, one post, one site.
pub fn fixtures() -> Fixtures {
	let author = author();
	let comments = vec![
		Rc::new(Comment {
			id: 5,
			body: "First!".to_owned(),
			author: author.clone(),
		}),
		Rc::new(Comment {
			id: 12,
			body: "I like XML better".to_owned(),
			author: author.clone(),
		}),
	];
	let post = Rc::new(Post {
		id: 1,
		title: "JSON API paints my bikeshed!".to_owned(),
		body: "Outside every fat man there was an even fatter man trying to close in"
			.to_owned(),
		author: RefCell::new(Some(author.clone() as Rc<dyn Any>)),
		comments: RefCell::new(comments.clone()),
	});
	let site = Rc::new(Site {
		id: 2,
		name: "site name".to_owned(),
		posts: vec![post.clone()],
	});
	Fixtures { author, comments, post, site }
}

#[derive(Default)]
pub struct AuthorSchema {
	pub hide_comments: bool,
}

impl ResourceSchema for AuthorSchema {
	fn resource_type(&self) -> &str {
		"people"
	}

	fn id(&self, instance: &dyn Any) -> String {
		instance.downcast_ref::<Author>().unwrap().id.to_string()
	}

	fn attributes(&self, instance: &dyn Any) -> IndexMap<String, Value> {
		let author = instance.downcast_ref::<Author>().unwrap();
		IndexMap::from([
			("first_name".to_owned(), json!(author.first_name)),
			("last_name".to_owned(), json!(author.last_name)),
		])
	}

	fn relationships(&self, instance: &dyn Any) -> Vec<RelationshipObject> {
		if self.hide_comments {
			return Vec::new();
		}
		let author = instance.downcast_ref::<Author>().unwrap();
		let comments: Vec<Rc<dyn Any>> = author
			.comments
			.borrow()
			.iter()
			.map(|comment| comment.clone() as Rc<dyn Any>)
			.collect();
		vec![RelationshipObject::new("comments", ResourceData::Many(comments))]
	}

	fn self_sub_url(&self) -> String {
		"http://example.com/people/".to_owned()
	}
}

#[derive(Default)]
pub struct CommentSchema {
	pub hide_author: bool,
}

impl ResourceSchema for CommentSchema {
	fn resource_type(&self) -> &str {
		"comments"
	}

	fn id(&self, instance: &dyn Any) -> String {
		instance.downcast_ref::<Comment>().unwrap().id.to_string()
	}

	fn attributes(&self, instance: &dyn Any) -> IndexMap<String, Value> {
		let comment = instance.downcast_ref::<Comment>().unwrap();
		IndexMap::from([("body".to_owned(), json!(comment.body))])
	}

	fn relationships(&self, instance: &dyn Any) -> Vec<RelationshipObject> {
		if self.hide_author {
			return Vec::new();
		}
		let comment = instance.downcast_ref::<Comment>().unwrap();
		vec![RelationshipObject::new(
			"author",
			ResourceData::One(comment.author.clone() as Rc<dyn Any>),
		)]
	}

	fn self_sub_url(&self) -> String {
		"http://example.com/comments/".to_owned()
	}

	fn show_self_in_included(&self) -> bool {
		true
	}
}

#[derive(Default)]
pub struct PostSchema {
	pub as_references: bool,
	pub show_relationship_links: bool,
	pub comments_pagination: Option<PaginationLinks>,
	pub include_paths: Vec<String>,
}

impl ResourceSchema for PostSchema {
	fn resource_type(&self) -> &str {
		"posts"
	}

	fn id(&self, instance: &dyn Any) -> String {
		instance.downcast_ref::<Post>().unwrap().id.to_string()
	}

	fn attributes(&self, instance: &dyn Any) -> IndexMap<String, Value> {
		let post = instance.downcast_ref::<Post>().unwrap();
		IndexMap::from([
			("title".to_owned(), json!(post.title)),
			("body".to_owned(), json!(post.body)),
		])
	}

	fn relationships(&self, instance: &dyn Any) -> Vec<RelationshipObject> {
		let post = instance.downcast_ref::<Post>().unwrap();
		let author_data = match post.author.borrow().as_ref() {
			Some(target) => ResourceData::One(target.clone()),
			None => ResourceData::Null,
		};
		let comments: Vec<Rc<dyn Any>> = post
			.comments
			.borrow()
			.iter()
			.map(|comment| comment.clone() as Rc<dyn Any>)
			.collect();

		let mut author = RelationshipObject::new("author", author_data);
		let mut comments = RelationshipObject::new("comments", ResourceData::Many(comments));
		if self.as_references {
			author = author.as_reference();
			comments = comments.as_reference();
		}
		if self.show_relationship_links {
			author = author.with_self_link().with_related_link();
			comments = comments
				.with_self_sub_url("/relationships/comments")
				.with_related_sub_url("comments");
		}
		if let Some(pagination) = &self.comments_pagination {
			comments = comments.with_pagination(pagination.clone());
		}
		vec![author, comments]
	}

	fn self_sub_url(&self) -> String {
		"http://example.com/posts/".to_owned()
	}

	fn default_include_paths(&self) -> Vec<String> {
		self.include_paths.clone()
	}
}

pub struct SiteSchema {
	pub include_paths: Vec<String>,
}

impl Default for SiteSchema {
	fn default() -> Self {
		Self {
			include_paths: vec!["posts".to_owned()],
		}
	}
}

impl ResourceSchema for SiteSchema {
	fn resource_type(&self) -> &str {
		"sites"
	}

	fn id(&self, instance: &dyn Any) -> String {
		instance.downcast_ref::<Site>().unwrap().id.to_string()
	}

	fn attributes(&self, instance: &dyn Any) -> IndexMap<String, Value> {
		let site = instance.downcast_ref::<Site>().unwrap();
		IndexMap::from([("name".to_owned(), json!(site.name))])
	}

	fn relationships(&self, instance: &dyn Any) -> Vec<RelationshipObject> {
		let site = instance.downcast_ref::<Site>().unwrap();
		let posts: Vec<Rc<dyn Any>> = site
			.posts
			.iter()
			.map(|post| post.clone() as Rc<dyn Any>)
			.collect();
		vec![RelationshipObject::new("posts", ResourceData::Many(posts))]
	}

	fn self_sub_url(&self) -> String {
		"http://example.com/sites/".to_owned()
	}

	fn default_include_paths(&self) -> Vec<String> {
		self.include_paths.clone()
	}
}

/// Registers every fixture schema with default settings.
pub fn default_container() -> SchemaContainer {
	let mut container = SchemaContainer::new();
	container.register::<Author>(Rc::new(AuthorSchema::default()));
	container.register::<Comment>(Rc::new(CommentSchema::default()));
	container.register::<Post>(Rc::new(PostSchema::default()));
	container.register::<Site>(Rc::new(SiteSchema::default()));
	container
}
