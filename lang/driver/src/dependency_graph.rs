use fxhash::{FxHashMap, FxHashSet};

/// The imports of every loaded module.
#[derive(Default)]
pub struct DependencyGraph {
    graph: FxHashMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn get(&self, module: &str) -> Option<&Vec<String>> {
        self.graph.get(module)
    }

    pub fn invalidate(&mut self, module: &str) {
        self.graph.remove(module);
    }

    /// Record that `module` imports `dependency`.
    pub fn add(&mut self, module: &str, dependency: &str) {
        let deps = self.graph.entry(module.to_owned()).or_default();
        if !deps.iter().any(|dep| dep == dependency) {
            deps.push(dependency.to_owned());
        }
    }

    /// The module itself and all modules that import it, directly or transitively.
    pub fn reverse_dependencies(&self, module: &str) -> Vec<String> {
        let mut closure = Vec::new();
        let mut stack = vec![module.to_owned()];
        let mut visited = FxHashSet::default();
        while let Some(current) = stack.pop() {
            if visited.insert(current.clone()) {
                let rev_deps = self
                    .graph
                    .iter()
                    .filter(|(_, deps)| deps.contains(&current))
                    .map(|(rev_dep, _)| rev_dep.clone());
                stack.extend(rev_deps);
                closure.push(current);
            }
        }
        closure
    }
}
