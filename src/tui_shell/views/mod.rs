mod todos;

pub(super) use self::todos::TodoListView;
