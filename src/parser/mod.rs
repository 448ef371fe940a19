mod frontmatter;

pub use frontmatter::{parse_frontmatter, FrontmatterError, RawHeader};
