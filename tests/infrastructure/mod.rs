mod azure_doc_intel_adapter_test;
mod azure_proxy_client_test;
mod cloud_services_test;
