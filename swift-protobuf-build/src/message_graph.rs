use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;
use petgraph::Graph;

use prost_types::field_descriptor_proto::{Label, Type};

use crate::descriptor_set::{DescriptorSet, MessageDescriptor};

/// Messages with more fields than this keep them in shared heap storage.
const HEAP_STORAGE_FIELD_THRESHOLD: usize = 16;

/// `MessageGraph` builds a graph of messages whose edges correspond to
/// message and group typed fields, of any cardinality. It answers whether a
/// message transitively declares required fields, which decides if the
/// generated `isInitialized` has to descend into a field.
pub struct MessageGraph {
    index: HashMap<usize, NodeIndex>,
    graph: Graph<usize, ()>,
    required: Vec<bool>,
}

impl MessageGraph {
    pub fn new(descriptors: &DescriptorSet<'_>) -> MessageGraph {
        let mut msg_graph = MessageGraph {
            index: HashMap::new(),
            graph: Graph::new(),
            required: Vec::new(),
        };

        for (msg_index, message) in descriptors.messages().iter().enumerate() {
            let node = msg_graph.get_or_insert_index(msg_index);
            msg_graph.required.push(
                message
                    .fields()
                    .iter()
                    .any(|field| field.label() == Label::Required),
            );

            for field in message.fields() {
                if !matches!(field.r#type(), Type::Message | Type::Group) {
                    continue;
                }
                // Unresolvable references surface as errors once the field
                // itself is generated.
                if let Some(target) = descriptors.lookup_message_index(field.type_name()) {
                    let target = msg_graph.get_or_insert_index(target);
                    msg_graph.graph.add_edge(node, target, ());
                }
            }
        }

        msg_graph
    }

    fn get_or_insert_index(&mut self, msg_index: usize) -> NodeIndex {
        let MessageGraph {
            ref mut index,
            ref mut graph,
            ..
        } = *self;
        *index
            .entry(msg_index)
            .or_insert_with(|| graph.add_node(msg_index))
    }

    /// Returns `true` if the message, or any message reachable through its
    /// message fields, declares a required field.
    pub fn has_required_fields(&self, msg_index: usize) -> bool {
        let start = match self.index.get(&msg_index) {
            Some(start) => *start,
            None => return false,
        };

        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(node) = dfs.next(&self.graph) {
            if self.required[self.graph[node]] {
                return true;
            }
        }
        false
    }
}

/// Decides whether a message keeps its fields in a shared, copy-on-write
/// storage class instead of inline stored properties.
///
/// Large messages and messages with singular message fields (which
/// includes every recursive message) use heap storage.
pub fn uses_heap_storage(message: &MessageDescriptor<'_>) -> bool {
    let fields = message.fields();
    fields.len() > HEAP_STORAGE_FIELD_THRESHOLD
        || fields.iter().any(|field| {
            field.label() != Label::Repeated
                && (field.oneof_index.is_none() || field.proto3_optional())
                && matches!(field.r#type(), Type::Message | Type::Group)
        })
}
