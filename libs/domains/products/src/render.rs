//! Plain-text summaries returned by the lookup endpoints.

/// Anything that can be summarized as `id : <id> title : <title>`
pub trait Summary {
    fn summary_id(&self) -> i64;
    fn summary_title(&self) -> &str;
}

impl Summary for crate::models::Product {
    fn summary_id(&self) -> i64 {
        self.id
    }

    fn summary_title(&self) -> &str {
        &self.title
    }
}

/// Single-item form: `id : 1 title : Milk`
pub fn render_one<T: Summary>(item: &T) -> String {
    format!("id : {} title : {}", item.summary_id(), item.summary_title())
}

/// List form: every item as `id : <id>\n title : <title>\n`, concatenated
pub fn render_list<T: Summary>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!("id : {}\n title : {}\n", item.summary_id(), item.summary_title()))
        .collect()
}
