use crate::tree::{Children, Node};

pub struct Preorder<'a> {
    start: Option<Node<'a>>,
    stack: Vec<(Node<'a>, Children<'a>)>,
}

impl<'a> Preorder<'a> {
    pub fn new(start: Node<'a>) -> Self {
        Self { start: Some(start), stack: Vec::new() }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.stack.push((start, start.children()));
            return Some(WalkEvent::Enter(start));
        }

        let next = self.stack.last_mut()?.1.next();
        match next {
            Some(child) => {
                self.stack.push((child, child.children()));
                Some(WalkEvent::Enter(child))
            }
            None => {
                let (node, _) = self.stack.pop()?;
                Some(WalkEvent::Leave(node))
            }
        }
    }
}

#[derive(Debug)]
pub enum WalkEvent<'a> {
    Enter(Node<'a>),
    Leave(Node<'a>),
}
