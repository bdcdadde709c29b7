use crate::module::Module;

/// Pre-order walk over a module and its descendants.
///
/// Children are visited in call declaration order.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a Module>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(start: &'a Module) -> Self {
        Self { stack: vec![start] }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Module;

    fn next(&mut self) -> Option<Self::Item> {
        let module = self.stack.pop()?;
        let children: Vec<&'a Module> = module.calls().map(|call| call.module()).collect();
        self.stack.extend(children.into_iter().rev());
        Some(module)
    }
}
