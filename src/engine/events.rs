// ==========================================
// Smart Vista 能源与OEE仪表盘 - 节点变更订阅
// ==========================================
// 职责: 维护节点值变更的订阅登记与分发
// 说明: 仅在节点值实际变化时由引擎触发分发
// ==========================================

use crate::engine::evaluator::NodeValue;
use crate::engine::graph::NodeId;
use uuid::Uuid;

/// 订阅句柄
pub type SubscriptionId = Uuid;

struct Subscription {
    id: SubscriptionId,
    node: NodeId,
    callback: Box<dyn FnMut(&NodeValue)>,
}

/// 订阅登记表
///
/// 每个订阅绑定单一节点; 同一节点可有多个订阅者,
/// 分发按订阅登记顺序进行
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    subscriptions: Vec<Subscription>,
}

impl SubscriberRegistry {
    pub(crate) fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// 登记订阅
    ///
    /// # 参数
    /// - `node`: 订阅的节点
    /// - `callback`: 节点值变化时的回调
    ///
    /// # 返回
    /// - 可用于退订的订阅句柄
    pub(crate) fn subscribe(
        &mut self,
        node: NodeId,
        callback: Box<dyn FnMut(&NodeValue)>,
    ) -> SubscriptionId {
        let id = Uuid::new_v4();
        self.subscriptions.push(Subscription { id, node, callback });
        tracing::debug!("登记订阅: node={}, id={}", node, id);
        id
    }

    /// 取消订阅
    ///
    /// # 返回
    /// - `true`: 订阅存在并已移除
    /// - `false`: 订阅句柄未登记
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        let removed = self.subscriptions.len() < before;
        if removed {
            tracing::debug!("移除订阅: id={}", id);
        }
        removed
    }

    /// 向某节点的全部订阅者分发新值
    pub(crate) fn notify(&mut self, node: NodeId, value: &NodeValue) {
        let mut delivered = 0usize;
        for sub in self.subscriptions.iter_mut().filter(|s| s.node == node) {
            (sub.callback)(value);
            delivered += 1;
        }
        if delivered > 0 {
            tracing::debug!("分发节点变更: node={}, 订阅者={}", node, delivered);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.subscriptions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_notify() {
        let mut registry = SubscriberRegistry::new();
        let hits = Rc::new(RefCell::new(0));

        let hits_clone = Rc::clone(&hits);
        registry.subscribe(
            NodeId::Aggregation,
            Box::new(move |_| *hits_clone.borrow_mut() += 1),
        );

        let value = NodeValue::Alerts(vec![]);
        registry.notify(NodeId::Aggregation, &value);
        registry.notify(NodeId::Aggregation, &value);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_notify_only_matching_node() {
        let mut registry = SubscriberRegistry::new();
        let hits = Rc::new(RefCell::new(0));

        let hits_clone = Rc::clone(&hits);
        registry.subscribe(
            NodeId::OeeScore,
            Box::new(move |_| *hits_clone.borrow_mut() += 1),
        );

        registry.notify(NodeId::Aggregation, &NodeValue::Alerts(vec![]));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut registry = SubscriberRegistry::new();
        let id = registry.subscribe(NodeId::Alerts, Box::new(|_| {}));
        assert_eq!(registry.len(), 1);

        assert!(registry.unsubscribe(id));
        assert_eq!(registry.len(), 0);
        // 重复退订返回 false
        assert!(!registry.unsubscribe(id));
    }
}
