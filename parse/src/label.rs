use indexmap::IndexSet;
use log::trace;

/// Label definitions and jump references seen so far.
///
/// A jump is *backward* when its label is already defined, *forward* when the
/// label gets defined later, and *bad* when the label is never defined.
#[derive(Debug, Default, Clone)]
pub struct Labels {
    defined: IndexSet<String>,
    // Jumps whose label is not defined (yet), one entry per jump
    pending: Vec<String>,
    forward: usize,
    backward: usize,
    returns: usize,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name`. Redefinitions are ignored, the first definition wins.
    pub fn define(&mut self, name: &str) {
        if self.defined.contains(name) {
            trace!("label `{}` redefined, ignored", name);
            return;
        }
        self.defined.insert(name.to_string());

        let resolved = self.pending.iter().filter(|label| *label == name).count();
        self.forward += resolved;
        self.pending.retain(|label| label != name);
        trace!("label `{}` defined, {} forward jump(s) resolved", name, resolved);
    }

    pub fn jump(&mut self, name: &str) {
        if self.defined.contains(name) {
            self.backward += 1;
            trace!("jump to `{}` is backward", name);
        } else {
            self.pending.push(name.to_string());
            trace!("jump to `{}` is pending", name);
        }
    }

    /// A jump without a named target (`RETURN`).
    pub fn ret(&mut self) {
        self.returns += 1;
    }

    /// Referenced but (so far) undefined labels, deduplicated.
    pub fn undefined(&self) -> IndexSet<&str> {
        self.pending.iter().map(|s| s.as_str()).collect()
    }

    pub fn count(&self) -> usize {
        self.defined.len()
    }

    pub fn forward(&self) -> usize {
        self.forward
    }

    pub fn backward(&self) -> usize {
        self.backward
    }

    /// Jumps whose label is not defined, final once the input is exhausted.
    pub fn bad(&self) -> usize {
        self.pending.len()
    }

    pub fn returns(&self) -> usize {
        self.returns
    }

    pub fn total(&self) -> usize {
        self.forward + self.backward + self.bad() + self.returns
    }
}
