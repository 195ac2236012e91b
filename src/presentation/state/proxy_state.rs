use std::sync::Arc;

use crate::application::ports::CloudProxy;

pub struct ProxyState<P>
where
    P: CloudProxy,
{
    pub proxy: Arc<P>,
}

impl<P> Clone for ProxyState<P>
where
    P: CloudProxy,
{
    fn clone(&self) -> Self {
        Self {
            proxy: Arc::clone(&self.proxy),
        }
    }
}
