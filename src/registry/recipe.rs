use std::collections::{HashMap, HashSet};

use crate::{
    artifact::model::Artifact,
    foundation::error::{TesseraError, TesseraResult},
    registry::op::{ArtifactSource, OpCall, Services},
};

/// One named invocation in a [`Recipe`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Step {
    /// Unique id; later steps refer to this step's output by it.
    pub id: String,
    /// Operation and parameters.
    #[serde(flatten)]
    pub call: OpCall,
}

/// Ordered list of steps, executed exactly as listed.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Recipe {
    /// Steps in execution order.
    pub steps: Vec<Step>,
}

/// Artifacts produced by [`Recipe::run`], in step order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeOutputs {
    order: Vec<String>,
    values: HashMap<String, Artifact>,
}

impl RecipeOutputs {
    /// Output of step `id`.
    pub fn get(&self, id: &str) -> Option<&Artifact> {
        self.values.get(id)
    }

    /// Step ids in execution order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(id, artifact)` pairs in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Artifact)> {
        self.order
            .iter()
            .filter_map(|id| self.values.get(id).map(|a| (id.as_str(), a)))
    }

    /// Output of the last step.
    pub fn last(&self) -> Option<(&str, &Artifact)> {
        let id = self.order.last()?;
        self.values.get(id).map(|a| (id.as_str(), a))
    }

    /// Number of produced artifacts.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` when nothing was produced.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn push(&mut self, id: String, artifact: Artifact) {
        self.values.insert(id.clone(), artifact);
        self.order.push(id);
    }
}

impl ArtifactSource for RecipeOutputs {
    fn artifact(&self, id: &str) -> Option<&Artifact> {
        self.get(id)
    }
}

impl Recipe {
    /// Parse a recipe from JSON text.
    pub fn from_json(text: &str) -> TesseraResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| TesseraError::validation(format!("invalid recipe: {e}")))
    }

    /// Check step ids and references without running anything.
    ///
    /// Ids must be unique and non-empty; every reference must name an earlier step.
    pub fn validate(&self) -> TesseraResult<()> {
        let all: HashSet<&str> = self.steps.iter().map(|s| s.id.as_str()).collect();
        let mut seen = HashSet::<&str>::with_capacity(self.steps.len());
        for step in &self.steps {
            if step.id.is_empty() {
                return Err(TesseraError::validation("recipe step ids must not be empty"));
            }
            for dep in step.call.dependencies() {
                if seen.contains(dep) {
                    continue;
                }
                let why = if dep == step.id || all.contains(dep) {
                    "a step that has not run yet"
                } else {
                    "an unknown step"
                };
                return Err(TesseraError::reference(format!(
                    "step '{}' ({}) references {why}: '{dep}'",
                    step.id,
                    step.call.name()
                )));
            }
            if !seen.insert(step.id.as_str()) {
                return Err(TesseraError::validation(format!(
                    "duplicate step id '{}'",
                    step.id
                )));
            }
        }
        Ok(())
    }

    /// Run every step in order and collect all outputs.
    pub fn run(&self, services: &Services) -> TesseraResult<RecipeOutputs> {
        self.run_until(None, services)
    }

    /// Run steps in order, stopping after `target` when given.
    #[tracing::instrument(skip(self, services), fields(steps = self.steps.len()))]
    pub fn run_until(
        &self,
        target: Option<&str>,
        services: &Services,
    ) -> TesseraResult<RecipeOutputs> {
        self.validate()?;
        if let Some(t) = target
            && !self.steps.iter().any(|s| s.id == t)
        {
            return Err(TesseraError::reference(format!(
                "target step '{t}' is not in the recipe"
            )));
        }

        let mut outputs = RecipeOutputs::default();
        for step in &self.steps {
            tracing::debug!(id = %step.id, op = %step.call.name(), "running step");
            let artifact = step.call.execute(&outputs, services)?;
            tracing::debug!(id = %step.id, hash = %artifact.content_hash(), "step done");
            outputs.push(step.id.clone(), artifact);
            if target == Some(step.id.as_str()) {
                break;
            }
        }
        Ok(outputs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/recipe.rs"]
mod tests;
