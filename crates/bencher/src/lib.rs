use weft_web::Body;

/// A named body shape used as benchmark input.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    shape: BodyShape,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, shape: BodyShape) -> Self {
        Self { name, group, shape }
    }

    pub fn small(name: &'static str, shape: BodyShape) -> Self {
        Self::new(name, TestGroup::Small, shape)
    }

    pub fn large(name: &'static str, shape: BodyShape) -> Self {
        Self::new(name, TestGroup::Large, shape)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn shape(&self) -> BodyShape {
        self.shape
    }

    /// Builds a fresh body of this case's shape and size.
    pub fn body(&self) -> Body {
        let repeat = match self.group {
            TestGroup::Small => 1,
            TestGroup::Large => 512,
        };

        match self.shape {
            BodyShape::Text => Body::from("hello world ".repeat(repeat)),
            BodyShape::Html => Body::from(format!("<ul>{}</ul>", "<li>item</li>".repeat(repeat))),
            BodyShape::Bytes => Body::from(vec![0x5a_u8; 64 * repeat]),
            BodyShape::Json => {
                let items: Vec<_> = (0..repeat).map(|i| serde_json::json!({ "id": i, "name": "item" })).collect();
                Body::json(items)
            }
            BodyShape::Empty => Body::empty(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub enum BodyShape {
    Text,
    Html,
    Bytes,
    Json,
    Empty,
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Large,
}
