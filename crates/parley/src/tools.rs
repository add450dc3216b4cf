//! Uniform calling convention for host capabilities.
//!
//! A capability is written once as a [`TypedTool`] with concrete input and output
//! types. [`ErasedTool`] turns it into a [`Tool`], which publishes a JSON schema for
//! its input and accepts/returns plain JSON. Input is checked against the typed shape
//! on every call, so a malformed payload fails with [`Error::InvalidInput`] before the
//! capability runs.
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::errors::{Error, Result};

pub mod shell;

pub use shell::{ShellInput, ShellTool};

/// What a caller needs to know to pick a tool and build its input, without running it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDescriptor {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// JSON schema the input must satisfy
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn new<N, D>(name: N, description: D, input_schema: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        ToolDescriptor {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// A request to run a named tool, e.g. decoded from a model reply or an RPC body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub input: Value,
}

impl ToolCall {
    pub fn new<S: Into<String>>(name: S, input: Value) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// Type-erased tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Static description of the tool; never has side effects.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Run the tool on a JSON payload conforming to `descriptor().input_schema`.
    async fn invoke(&self, input: Value) -> Result<Value>;
}

/// A capability with statically known input and output shapes.
#[async_trait]
pub trait TypedTool: Send + Sync {
    type Input: DeserializeOwned + JsonSchema + Send;
    type Output: Serialize + Send;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    async fn call(&self, input: Self::Input) -> Result<Self::Output>;

    fn into_tool(self) -> ErasedTool<Self>
    where
        Self: Sized,
    {
        ErasedTool::new(self)
    }
}

/// Adapts a [`TypedTool`] to the [`Tool`] calling convention.
pub struct ErasedTool<T: TypedTool> {
    inner: T,
    descriptor: ToolDescriptor,
}

impl<T: TypedTool> ErasedTool<T> {
    pub fn new(inner: T) -> Self {
        // Schema wraps a JSON value, so serializing it cannot fail
        let schema = serde_json::to_value(schemars::schema_for!(T::Input)).unwrap_or_default();
        let descriptor = ToolDescriptor::new(inner.name(), inner.description(), schema);
        Self { inner, descriptor }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: TypedTool> Tool for ErasedTool<T> {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        let input: T::Input = serde_json::from_value(input)
            .map_err(|e| Error::InvalidInput(format!("{}: {}", self.descriptor.name, e)))?;

        let output = self.inner.call(input).await?;
        serde_json::to_value(output).map_err(|e| Error::ExecutionFailed {
            code: None,
            signal: None,
            stderr: format!("{} produced unserializable output: {}", self.descriptor.name, e),
        })
    }
}

/// Name-keyed set of tools, kept in registration order.
#[derive(Clone, Default)]
pub struct Toolbox {
    tools: Vec<Arc<dyn Tool>>,
}

impl Toolbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any earlier tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.descriptor().name.clone();
        match self.tools.iter().position(|t| t.descriptor().name == name) {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn with_tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.register(Arc::new(tool));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.descriptor().name == name)
    }

    pub fn descriptors(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub async fn invoke(&self, name: &str, input: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::InvalidInput(format!("no tool named '{}'", name)))?;
        debug!(tool = name, "invoking tool");
        tool.invoke(input).await
    }

    pub async fn dispatch(&self, call: ToolCall) -> Result<Value> {
        self.invoke(&call.name, call.input).await
    }
}
