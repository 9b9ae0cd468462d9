use serde::Serialize;

/// A fixed news category: the label shown to users and the Google News
/// search string behind it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub label: &'static str,
    pub query: &'static str,
}

const BUILTIN: [Category; 9] = [
    Category { label: "Tech / AI", query: "artificial intelligence OR AI OR machine learning OR LLM OR GenAI" },
    Category { label: "Startups", query: "startup funding OR tech startup" },
    Category { label: "India", query: "India news" },
    Category { label: "USA", query: "United States news" },
    Category { label: "World", query: "world news" },
    Category { label: "EPL", query: "English Premier League football" },
    Category { label: "Champions League", query: "UEFA Champions League" },
    Category { label: "NFL", query: "NFL American football" },
    Category { label: "General Sports", query: "sports news" },
];

const STOCKS: Category = Category { label: "Stocks", query: "latest stocks news" };

/// Ordered label -> query lookup. Built once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn builtin(with_stocks: bool) -> Self {
        let mut categories = BUILTIN.to_vec();
        if with_stocks { categories.push(STOCKS); }
        Self { categories }
    }

    pub fn all(&self) -> &[Category] { &self.categories }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|c| c.label)
    }

    pub fn get(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn query(&self, label: &str) -> Option<&'static str> {
        self.get(label).map(|c| c.query)
    }

    /// Resolve user input to a registered label, ignoring ASCII case.
    pub fn resolve(&self, input: &str) -> Option<&'static str> {
        let input = input.trim();
        self.categories.iter().find(|c| c.label.eq_ignore_ascii_case(input)).map(|c| c.label)
    }

    pub fn len(&self) -> usize { self.categories.len() }
}
