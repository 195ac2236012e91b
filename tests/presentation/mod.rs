mod session_cookie_test;
