use std::sync::Arc;

use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::Value;
use sqlwindow_ir::{WindowFunctionCall, WindowSpec};
use sqlwindow_storage::{Field, Schema, Table};
use tracing::{debug, info, instrument};

use crate::buffer::PartitionBuffer;
use crate::frame::{FrameResolver, PartitionView};
use crate::function::ValueFunction;
use crate::materializer::OutputMaterializer;
use crate::metrics::WindowMetrics;
use crate::ordering::OrderComparator;
use crate::partition::PartitionDetector;
use crate::settings::WindowSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperatorState {
    Running,
    Finished,
    Failed,
}

#[derive(Debug)]
struct CallState {
    resolver: FrameResolver,
    function: ValueFunction,
}

/// Streaming window operator over input already sorted by partition keys
/// and then order keys.
///
/// Pages go in through [`add_input`](Self::add_input); output pages carry the
/// input columns followed by one column per call and come back through
/// [`get_output`](Self::get_output) once every row of the page has been
/// evaluated. A partition is evaluated only after its last row has arrived,
/// so partitions may span any number of pages.
#[derive(Debug)]
pub struct WindowOperator {
    input_schema: Schema,
    output_schema: Schema,
    partition_by: Vec<usize>,
    order: OrderComparator,
    calls: Vec<CallState>,
    buffer: PartitionBuffer,
    materializer: OutputMaterializer,
    metrics: Arc<WindowMetrics>,
    state: OperatorState,
}

impl WindowOperator {
    pub fn try_new(
        schema: Schema,
        spec: &WindowSpec,
        calls: &[WindowFunctionCall],
        settings: WindowSettings,
    ) -> Result<Self> {
        settings.validate()?;
        schema.validate()?;
        for &column in &spec.partition_by {
            schema.field_at(column)?;
        }
        for sort in &spec.order_by {
            schema.field_at(sort.column)?;
        }
        let order = OrderComparator::new(&spec.order_by, settings.default_nulls_first);

        let mut states = Vec::with_capacity(calls.len());
        let mut output_fields = Vec::with_capacity(calls.len());
        for call in calls {
            let argument = schema.field_at(call.argument)?;
            let function = ValueFunction::try_new(&call.function, call.argument)?;
            let resolver = FrameResolver::try_new(&call.effective_frame(), &order, &schema)?;
            output_fields.push(Field::nullable(
                call.output_name.clone(),
                argument.data_type,
            ));
            states.push(CallState { resolver, function });
        }

        let mut output_schema = schema.clone();
        for field in &output_fields {
            output_schema.add_field(field.clone());
        }
        output_schema.validate()?;

        debug!(
            calls = calls.len(),
            partition_keys = spec.partition_by.len(),
            order_keys = spec.order_by.len(),
            "created window operator"
        );

        Ok(Self {
            buffer: PartitionBuffer::new(&schema, &spec.partition_by, settings.max_partition_rows),
            input_schema: schema,
            output_schema,
            partition_by: spec.partition_by.clone(),
            order,
            calls: states,
            materializer: OutputMaterializer::new(output_fields),
            metrics: Arc::new(WindowMetrics::new()),
            state: OperatorState::Running,
        })
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    pub fn metrics(&self) -> Arc<WindowMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn needs_input(&self) -> bool {
        self.state == OperatorState::Running
    }

    pub fn has_failed(&self) -> bool {
        self.state == OperatorState::Failed
    }

    pub fn is_finished(&self) -> bool {
        self.state == OperatorState::Finished && !self.materializer.has_ready()
    }

    pub fn add_input(&mut self, page: Table) -> Result<()> {
        self.check_running()?;
        let result = self.consume(page);
        self.track(result)
    }

    /// Signals end of input and evaluates the last buffered partition.
    #[instrument(skip_all)]
    pub fn finish(&mut self) -> Result<()> {
        self.check_running()?;
        let result = self.flush();
        self.track(result)?;
        self.state = OperatorState::Finished;
        info!(
            partitions = self.metrics.get_partition_count(),
            rows = self.metrics.get_row_count(),
            largest_partition = self.metrics.get_largest_partition(),
            empty_frames = self.metrics.get_empty_frame_count(),
            "window operator finished"
        );
        Ok(())
    }

    /// Next completed output page. Nothing is returned once the operator has
    /// failed.
    pub fn get_output(&mut self) -> Option<Table> {
        if self.has_failed() {
            return None;
        }
        self.materializer.pop_ready()
    }

    /// Runs every page through the operator and returns all output pages.
    pub fn execute(&mut self, pages: impl IntoIterator<Item = Table>) -> Result<Vec<Table>> {
        let mut output = Vec::new();
        for page in pages {
            self.add_input(page)?;
            while let Some(table) = self.get_output() {
                output.push(table);
            }
        }
        self.finish()?;
        while let Some(table) = self.get_output() {
            output.push(table);
        }
        Ok(output)
    }

    fn check_running(&self) -> Result<()> {
        match self.state {
            OperatorState::Running => Ok(()),
            OperatorState::Failed => Err(Error::internal("operator has failed")),
            OperatorState::Finished => Err(Error::internal("operator is finished")),
        }
    }

    fn track(&mut self, result: Result<()>) -> Result<()> {
        if result.is_err() {
            self.state = OperatorState::Failed;
        }
        result
    }

    fn consume(&mut self, page: Table) -> Result<()> {
        if !page.schema().is_compatible_with(&self.input_schema) {
            return Err(Error::schema_mismatch(
                "input page does not match the operator schema",
            ));
        }
        let ranges: Vec<_> = PartitionDetector::new(&page, &self.partition_by).collect();
        self.materializer.enqueue_page(page.clone())?;
        for range in ranges {
            if !self.buffer.is_empty() && !self.buffer.continues_partition(&page, range.start) {
                self.evaluate_partition()?;
            }
            self.buffer.append(&page, range)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.evaluate_partition()?;
        }
        let pending = self.materializer.pending_rows();
        if pending > 0 {
            return Err(Error::internal(format!(
                "{} rows left without results",
                pending
            )));
        }
        Ok(())
    }

    /// Resolves and evaluates every row of the buffered partition. Results
    /// reach the materializer only when the whole partition succeeded.
    #[instrument(skip_all, fields(rows = self.buffer.len()))]
    fn evaluate_partition(&mut self) -> Result<()> {
        let rows = self.buffer.len();
        debug!(functions = self.calls.len(), "evaluating partition");

        let view = PartitionView::new(self.buffer.columns(), &self.order, rows);
        let mut scratch: Vec<Vec<Value>> =
            self.calls.iter().map(|_| Vec::with_capacity(rows)).collect();
        let mut empty_frames = 0u64;
        let arguments = self
            .calls
            .iter()
            .map(|call| self.buffer.column(call.function.argument()))
            .collect::<Result<Vec<_>>>()?;

        for call in &mut self.calls {
            call.resolver.begin_partition();
            call.function.reset(rows);
        }
        for row in 0..rows {
            let outputs = self.calls.iter_mut().zip(scratch.iter_mut());
            for ((call, out), column) in outputs.zip(&arguments) {
                let frame = call.resolver.resolve(&view, row)?;
                if frame.is_empty() {
                    empty_frames += 1;
                }
                out.push(call.function.evaluate(frame, column));
            }
        }

        self.materializer.commit(rows, scratch)?;
        self.metrics.record_partition(rows);
        self.metrics.record_empty_frames(empty_frames);
        self.buffer.clear();
        Ok(())
    }
}
