use crate::comparator;
use crate::driver::{self, CliEngine, Engine, HttpWebhookClient, WebhookClient, run_shell};
use crate::error::{AssertionFailure, CommandError, ConfigError, ExecutionError, TestError};
use crate::report::Reporter;
use crate::suite::{
    EntryPoint, NodeExpectation, TestCase, TestSuite, TriggerSpec, WebhookSpec, WorkflowSuite,
};
use crate::workflow::{self, WorkflowGraph};
use std::path::Path;
use tracing::{debug, info, info_span, warn};

mod config;
mod verdict;

pub use config::RunnerConfig;
pub use verdict::{Tally, Verdict};

/// Runs tests one at a time against an engine and reports their verdicts.
///
/// A test moves through pre-commands, execution (a patched workflow run or a
/// webhook call), assertions and post-commands. Configuration and execution
/// errors abort only the test they occur in; assertion and post-command
/// failures are collected so every problem of a run is reported at once.
pub struct TestRunner {
    engine: Box<dyn Engine>,
    webhook: Box<dyn WebhookClient>,
}

pub struct TestRunnerBuilder {
    engine: Box<dyn Engine>,
    webhook: Option<Box<dyn WebhookClient>>,
}

impl TestRunnerBuilder {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            engine,
            webhook: None,
        }
    }

    pub fn with_webhook_client(mut self, client: Box<dyn WebhookClient>) -> Self {
        self.webhook = Some(client);
        self
    }

    /// Builds the runner, falling back to an HTTP webhook client with the
    /// default timeout.
    pub fn build(self) -> Result<TestRunner, ExecutionError> {
        let webhook = match self.webhook {
            Some(client) => client,
            None => Box::new(HttpWebhookClient::new()?),
        };
        Ok(TestRunner {
            engine: self.engine,
            webhook,
        })
    }
}

impl TestRunner {
    pub fn builder(engine: Box<dyn Engine>) -> TestRunnerBuilder {
        TestRunnerBuilder::new(engine)
    }

    /// A runner using the engine CLI and a real HTTP client.
    pub fn from_config(config: &RunnerConfig) -> Result<Self, ExecutionError> {
        Self::builder(Box::new(CliEngine::new(config.engine_prefix.as_str())))
            .with_webhook_client(Box::new(HttpWebhookClient::with_timeout(
                config.webhook_timeout,
            )?))
            .build()
    }

    /// Runs every workflow of the suite in document order and returns the grand tally.
    pub fn run_suite(&self, suite: &TestSuite, reporter: &mut dyn Reporter) -> Tally {
        let total: Tally = suite
            .workflows
            .iter()
            .map(|(workflow_id, workflow)| self.run_workflow(workflow_id, workflow, reporter))
            .sum();
        reporter.suite_finished(total);
        total
    }

    /// Runs every test of one workflow in document order.
    ///
    /// A missing workflow document fails each of the workflow's tests.
    pub fn run_workflow(
        &self,
        workflow_id: &str,
        workflow: &WorkflowSuite,
        reporter: &mut dyn Reporter,
    ) -> Tally {
        reporter.workflow_started(workflow_id);
        let path = match &workflow.workflow_dir {
            Some(path) if path.exists() => Ok(path.as_path()),
            other => Err(ConfigError::WorkflowDirNotFound {
                workflow_id: workflow_id.to_string(),
                path: other
                    .as_ref()
                    .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            }),
        };

        let tally: Tally = workflow
            .tests
            .iter()
            .map(|(test_id, test)| {
                let verdict = match &path {
                    Ok(path) => self.run_test(workflow_id, path, test_id, test),
                    Err(e) => Verdict::new(
                        test_id.as_str(),
                        test.display_name(test_id),
                        vec![e.to_string()],
                    ),
                };
                reporter.test_finished(workflow_id, &verdict);
                Tally::of(&verdict)
            })
            .sum();

        reporter.workflow_finished(workflow_id, tally);
        tally
    }

    /// Runs a single test to completion and returns its verdict.
    pub fn run_test(
        &self,
        workflow_id: &str,
        workflow_path: &Path,
        test_id: &str,
        test: &TestCase,
    ) -> Verdict {
        let span = info_span!("test", workflow = workflow_id, test = test_id);
        let _guard = span.enter();

        let failures = match self.try_run_test(workflow_id, workflow_path, test) {
            Ok(failures) => failures,
            Err(e) => {
                warn!(error = %e, "test aborted");
                vec![e.to_string()]
            }
        };
        Verdict::new(test_id, test.display_name(test_id), failures)
    }

    fn try_run_test(
        &self,
        workflow_id: &str,
        workflow_path: &Path,
        test: &TestCase,
    ) -> Result<Vec<String>, TestError> {
        let entry = test.entry_point()?;
        run_pre_commands(test)?;

        let mut failures: Vec<String> = match entry {
            EntryPoint::Webhook { node, spec } => self.run_webhook(node, spec, test)?,
            EntryPoint::Trigger { node, spec } => {
                self.run_triggered(workflow_id, workflow_path, node, spec, test)?
            }
        }
        .iter()
        .map(ToString::to_string)
        .collect();

        failures.extend(run_post_commands(test).iter().map(ToString::to_string));
        Ok(failures)
    }

    fn run_webhook(
        &self,
        node: &str,
        spec: &WebhookSpec,
        test: &TestCase,
    ) -> Result<Vec<AssertionFailure>, TestError> {
        let url = spec
            .webhook_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingWebhookUrl {
                node: node.to_string(),
            })?;

        // Webhook tests cannot observe the execution trace; declared trace
        // assertions on other nodes are not evaluated.
        let unchecked = test.nodes.iter().filter(|(_, expectation)| {
            matches!(
                expectation,
                NodeExpectation::Node(a) | NodeExpectation::Output(a) if a.has_trace_checks()
            )
        });
        for (name, _) in unchecked {
            debug!(node = %name, "trace assertions ignored for webhook-triggered test");
        }

        let response = self.webhook.post(url, &spec.data)?;
        info!(status = response.status, "webhook responded");

        let mut failures = Vec::new();
        if let Some(want) = spec.response_code {
            if want != response.status {
                failures.push(AssertionFailure::ResponseCodeMismatch {
                    want,
                    got: response.status,
                });
            }
        }
        if let Some(want) = &spec.response_data {
            if *want != response.body {
                failures.push(AssertionFailure::ResponseDataMismatch {
                    want: want.clone(),
                    got: response.body,
                });
            }
        }
        Ok(failures)
    }

    fn run_triggered(
        &self,
        workflow_id: &str,
        workflow_path: &Path,
        trigger: &str,
        spec: &TriggerSpec,
        test: &TestCase,
    ) -> Result<Vec<AssertionFailure>, TestError> {
        let graph = WorkflowGraph::from_file(workflow_path)?;
        let patched = workflow::patch(&graph, trigger, &spec.data)?;
        let execution_id = graph
            .execution_id()
            .unwrap_or_else(|| workflow_id.to_string());

        let trace = driver::execute_graph(self.engine.as_ref(), &patched, &execution_id)?;

        let failures = test
            .nodes
            .iter()
            .filter(|(name, _)| name.as_str() != trigger)
            .flat_map(|(name, expectation)| match expectation {
                NodeExpectation::Node(assertions) | NodeExpectation::Output(assertions) => {
                    comparator::evaluate(name, assertions, &trace)
                }
                NodeExpectation::Trigger(_) | NodeExpectation::Webhook(_) => {
                    vec![AssertionFailure::UnsupportedRole {
                        node: name.clone(),
                        role: expectation.role().to_string(),
                    }]
                }
            })
            .collect();
        Ok(failures)
    }
}

/// Runs every declared pre-command in document order, stopping at the first failure.
fn run_pre_commands(test: &TestCase) -> Result<(), CommandError> {
    for (node, expectation) in &test.nodes {
        let Some(command) = expectation.hooks().pre_command.as_deref() else {
            continue;
        };
        let output = run_shell(command).map_err(|e| CommandError::Spawn {
            command: command.to_string(),
            message: e.to_string(),
        })?;
        if !output.success() {
            return Err(CommandError::PreCommandFailed {
                node: node.clone(),
                code: output.code_or_signal(),
            });
        }
    }
    Ok(())
}

/// Runs every declared post-command and compares its trimmed stdout.
fn run_post_commands(test: &TestCase) -> Vec<CommandError> {
    test.nodes
        .iter()
        .filter_map(|(node, expectation)| {
            let hooks = expectation.hooks();
            let command = hooks.post_command.as_deref()?;
            let output = match run_shell(command) {
                Ok(output) => output,
                Err(e) => {
                    return Some(CommandError::Spawn {
                        command: command.to_string(),
                        message: e.to_string(),
                    });
                }
            };
            if !output.success() {
                warn!(node = %node, rc = output.code_or_signal(), "postCommand exited nonzero");
            }
            let got = output.stdout.trim();
            let want = hooks.post_command_expected_output.as_deref().unwrap_or_default();
            (got != want).then(|| CommandError::PostCommandMismatch {
                node: node.clone(),
                want: want.to_string(),
                got: got.to_string(),
            })
        })
        .collect()
}
