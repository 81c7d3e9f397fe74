use crate::error::ScopeError;

#[derive(Debug, Clone, PartialEq)]
pub enum ChangeOp<K, V> {
    Set { key: K, prior: V },
    Unset { key: K },
}

#[derive(Debug)]
pub struct ChangeLog<K, V> {
    ops: Vec<ChangeOp<K, V>>,
    scope_sizes: Vec<usize>,
}

impl<K, V> ChangeLog<K, V> {
    pub fn new() -> Self {
        Self {
            ops: vec![],
            scope_sizes: vec![0],
        }
    }

    pub fn record(&mut self, op: ChangeOp<K, V>) {
        self.ops.push(op);
        match self.scope_sizes.last_mut() {
            Some(count) => *count += 1,
            None => unreachable!(),
        }
    }

    pub fn open_scope(&mut self) {
        self.scope_sizes.push(0);
    }

    // Drains the innermost scope's tail of the log, newest first,
    // so callers can apply the reversals in iteration order.
    pub fn close_scope(&mut self) -> Result<Vec<ChangeOp<K, V>>, ScopeError> {
        if self.scope_sizes.len() == 1 {
            return Err(ScopeError::ScopeUnderflow);
        }
        let count = match self.scope_sizes.pop() {
            Some(count) => count,
            None => unreachable!(),
        };
        let mut undone = self.ops.split_off(self.ops.len() - count);
        undone.reverse();
        Ok(undone)
    }

    pub fn depth(&self) -> usize {
        self.scope_sizes.len()
    }
}

impl<K, V> Default for ChangeLog<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{ChangeLog, ChangeOp};
    use crate::error::ScopeError;

    #[test]
    fn record_bumps_innermost_scope() {
        let mut log: ChangeLog<&str, i64> = ChangeLog::new();
        log.record(ChangeOp::Unset { key: "a" });

        log.open_scope();
        log.record(ChangeOp::Unset { key: "b" });
        log.record(ChangeOp::Set { key: "a", prior: 1 });

        let undone = log.close_scope().unwrap();
        assert_eq!(
            undone,
            vec![
                ChangeOp::Set { key: "a", prior: 1 },
                ChangeOp::Unset { key: "b" },
            ]
        );
    }

    #[test]
    fn close_drains_only_the_closed_scope() {
        let mut log: ChangeLog<&str, i64> = ChangeLog::new();
        log.record(ChangeOp::Unset { key: "root" });

        log.open_scope();
        log.record(ChangeOp::Unset { key: "inner" });
        assert_eq!(log.close_scope().unwrap().len(), 1);

        // The root entry is still owed to a hypothetical root close,
        // which the underflow guard forbids.
        assert_eq!(log.close_scope(), Err(ScopeError::ScopeUnderflow));
    }

    #[test]
    fn close_on_root_scope_errors() {
        let mut log: ChangeLog<String, String> = ChangeLog::new();
        assert_eq!(log.close_scope(), Err(ScopeError::ScopeUnderflow));
    }

    #[test]
    fn empty_scope_closes_clean() {
        let mut log: ChangeLog<&str, ()> = ChangeLog::new();
        log.open_scope();
        assert_eq!(log.close_scope().unwrap(), vec![]);
        assert_eq!(log.depth(), 1);
    }

    #[test]
    fn depth_tracks_open_scopes() {
        let mut log: ChangeLog<&str, ()> = ChangeLog::new();
        assert_eq!(log.depth(), 1);
        log.open_scope();
        log.open_scope();
        assert_eq!(log.depth(), 3);
        log.close_scope().unwrap();
        assert_eq!(log.depth(), 2);
    }
}
