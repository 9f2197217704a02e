use crate::kernel::schema::{
    create_table_sql, find_table, plan_import, schema_file_name, ImportPlan, PendingImport,
};
use crate::kernel::Action;
use crate::models::NodeKind;

impl super::Store {
    pub(super) fn reduce_schema(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::ImportSchema { database, table } => {
                let Some(schema) = find_table(&database, &table) else {
                    tracing::warn!(database, table, "import ignored: unknown table");
                    return super::DispatchResult::unchanged();
                };
                let sql = create_table_sql(schema);
                let pane = self.state.editor.active_pane_id();
                let active = self
                    .state
                    .active_tab()
                    .map(|tab| (tab.node_id.clone(), tab.content.clone()));

                match (plan_import(active.as_ref().map(|(_, c)| c.as_str())), active) {
                    (ImportPlan::ReplaceActive, Some((node_id, _))) => {
                        self.state.editor.edit(pane, &sql);
                        self.state.content.set(node_id, sql);
                    }
                    (ImportPlan::Confirm, Some((node_id, _))) => {
                        self.state.pending_import = Some(PendingImport {
                            table,
                            sql,
                            pane,
                            node_id,
                        });
                    }
                    _ => {
                        let name = schema_file_name(schema.name);
                        let node_id = match self.state.tree.insert(None, &name, NodeKind::File) {
                            Ok(id) => id,
                            Err(e) => {
                                tracing::warn!(error = %e, name, "import ignored");
                                return super::DispatchResult::unchanged();
                            }
                        };
                        self.state.content.set(node_id.clone(), sql.clone());
                        self.state.editor.open(node_id, &name, &sql);
                    }
                }
                tracing::debug!(database, table = schema.name, "schema imported");
                super::DispatchResult::changed(true)
            }
            Action::ConfirmImport => {
                let Some(pending) = self.state.pending_import.take() else {
                    return super::DispatchResult::unchanged();
                };
                if self.state.tree.contains(&pending.node_id) {
                    self.state.content.set(pending.node_id.clone(), pending.sql.clone());
                    self.state.editor.set_node_content(&pending.node_id, &pending.sql);
                } else {
                    tracing::warn!(node = %pending.node_id, "import target no longer exists");
                }
                super::DispatchResult::changed(true)
            }
            Action::CancelImport => {
                super::DispatchResult::changed(self.state.pending_import.take().is_some())
            }
            _ => super::DispatchResult::unchanged(),
        }
    }
}
