use super::Session;
use crate::core::{exterior_cards, interior_cards, Card, CardStack};
use crate::events::{wire_swipe_card, SwipeCardWiring};
use crate::{dom, overlay, ui};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// One swipeable stack: the model order plus the element built for each card.
struct StackView {
    container: web::Element,
    order: RefCell<CardStack<usize>>,
    elements: Vec<web::HtmlElement>,
}

impl StackView {
    /// Re-append elements in stack order; front card first.
    fn sync(&self) {
        for key in self.order.borrow().iter() {
            if let Some(el) = self.elements.get(*key) {
                _ = self.container.append_child(el);
            }
        }
    }
}

fn mount_stack(document: &web::Document, container_id: &str, cards: &[Card]) -> Option<Rc<StackView>> {
    let Some(container) = document.get_element_by_id(container_id) else {
        log::warn!("[select] missing #{}", container_id);
        return None;
    };
    container.set_inner_html("");
    let elements: Vec<web::HtmlElement> = cards
        .iter()
        .enumerate()
        .map(|(key, card)| ui::build_card(document, card, key))
        .collect::<Option<_>>()?;
    let view = Rc::new(StackView {
        container,
        order: RefCell::new(CardStack::new(0..elements.len())),
        elements,
    });
    for (key, card) in cards.iter().enumerate() {
        let v = view.clone();
        wire_swipe_card(SwipeCardWiring {
            card: view.elements[key].clone(),
            target_url: card.target_url.clone(),
            key,
            on_discarded: Rc::new(move |k| {
                if v.order.borrow_mut().send_to_back_where(|c| *c == k) {
                    v.sync();
                }
            }),
        });
    }
    view.sync();
    log::info!("[select] #{} has {} cards", container_id, cards.len());
    Some(view)
}

pub fn run(session: Session) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let project = &session.project;
    dom::set_text(&document, "header-title", &project.project_name);

    let exterior = exterior_cards(project, &session.project_id);
    let interior = interior_cards(project, &session.project_id);
    // The views own their closures; they live for the whole page
    _ = mount_stack(&document, "exterior-stack", &exterior);
    _ = mount_stack(&document, "interior-stack", &interior);

    overlay::hide_loading(&document);
    Ok(())
}
