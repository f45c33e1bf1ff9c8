use crate::dom::Dom;
use crate::dropdown::open_panel;
use crate::types::{ResultItem, ResultRecord};

/// Writes search results into the open dropdown panel
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    result_id_prefix: String,
}

impl ResultRenderer {
    pub fn new(result_id_prefix: impl Into<String>) -> Self {
        ResultRenderer {
            result_id_prefix: result_id_prefix.into(),
        }
    }

    /// Replace the panel's children with one item per result, in order.
    /// Does nothing and returns false when the panel is not open.
    pub fn render<D: Dom>(&self, dom: &mut D, results: &[ResultRecord]) -> bool {
        let Some(panel) = open_panel(dom) else {
            tracing::debug!(results = results.len(), "no open dropdown, dropping results");
            return false;
        };

        dom.clear(&panel);
        for (i, result) in results.iter().enumerate() {
            let item = ResultItem {
                id: format!("{}{}", self.result_id_prefix, i),
                title: result.name.clone(),
                href: result.url.clone(),
            };
            dom.append_result(&panel, &item);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeDom;

    fn record(name: &str) -> ResultRecord {
        ResultRecord {
            name: name.to_string(),
            url: format!("/{}.html", name.to_lowercase()),
        }
    }

    fn open_dom() -> FakeDom {
        let mut dom = FakeDom::new();
        dom.shown = true;
        dom
    }

    #[test]
    fn test_render_items_in_order() {
        let mut dom = open_dom();
        let renderer = ResultRenderer::new("result-");

        assert!(renderer.render(&mut dom, &[record("B"), record("A")]));

        assert_eq!(
            dom.items,
            vec![
                ResultItem {
                    id: "result-0".to_string(),
                    title: "B".to_string(),
                    href: "/b.html".to_string()
                },
                ResultItem {
                    id: "result-1".to_string(),
                    title: "A".to_string(),
                    href: "/a.html".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_rerender_replaces() {
        let mut dom = open_dom();
        let renderer = ResultRenderer::new("result-");

        renderer.render(&mut dom, &[record("A"), record("B")]);
        renderer.render(&mut dom, &[record("C")]);

        assert_eq!(dom.titles(), vec!["C"]);
        assert_eq!(dom.items[0].id, "result-0");
    }

    #[test]
    fn test_render_empty_clears() {
        let mut dom = open_dom();
        let renderer = ResultRenderer::new("result-");

        renderer.render(&mut dom, &[record("A")]);
        assert!(renderer.render(&mut dom, &[]));
        assert!(dom.items.is_empty());
    }

    #[test]
    fn test_render_without_open_panel_is_noop() {
        let renderer = ResultRenderer::new("result-");

        let mut closed = FakeDom::new();
        assert!(!renderer.render(&mut closed, &[record("A")]));
        assert!(closed.items.is_empty());
        assert_eq!(closed.clears, 0);

        let mut missing = FakeDom::without_panel();
        assert!(!renderer.render(&mut missing, &[record("A")]));
    }
}
