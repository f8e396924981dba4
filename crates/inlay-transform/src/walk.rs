//! Shared AST traversal for the rewrite passes.
//!
//! One recursive scan over a parsed program collects every node position the
//! tree passes care about; each pass then turns the positions it needs into
//! atomic span edits. Scanning and editing are kept separate so a pass can
//! never observe a half-rewritten tree.

use oxc_ast::ast::*;
use oxc_span::Span;

use crate::rtl::SIDE_PROP_COMPONENTS;

/// Node positions surfaced by one scan of a program.
#[derive(Debug, Default)]
pub(crate) struct SourceScan {
    /// Every string literal (spans include the quotes)
    pub strings: Vec<Span>,

    /// String literals holding utility class lists: className/classNames
    /// attributes, cn() arguments, cva() base and variant values, and
    /// className properties handed to mergeProps()
    pub class_strings: Vec<Span>,

    /// Template literals without substitutions (spans include the backticks)
    pub templates: Vec<Span>,

    /// Identifier-named JSX tag names, opening and closing
    pub jsx_tags: Vec<(Span, String)>,

    /// String values of `side` attributes and `side = "..."` parameter
    /// defaults on the components that accept logical side values
    pub side_values: Vec<Span>,
}

pub(crate) fn scan_program(program: &Program<'_>) -> SourceScan {
    let mut walker = Walker::default();
    for statement in program.body.iter() {
        walker.statement(statement);
    }

    let mut scan = walker.scan;
    scan.strings.sort_unstable_by_key(|span| (span.start, span.end));
    scan.strings.dedup();
    scan.class_strings
        .sort_unstable_by_key(|span| (span.start, span.end));
    scan.class_strings.dedup();
    scan
}

#[derive(Default)]
struct Walker {
    scan: SourceScan,
}

impl Walker {
    fn statement(&mut self, statement: &Statement<'_>) {
        match statement {
            Statement::BlockStatement(block) => {
                for statement in block.body.iter() {
                    self.statement(statement);
                }
            }
            Statement::ExpressionStatement(statement) => self.expression(&statement.expression),
            Statement::IfStatement(statement) => {
                self.expression(&statement.test);
                self.statement(&statement.consequent);
                if let Some(alternate) = &statement.alternate {
                    self.statement(alternate);
                }
            }
            Statement::ReturnStatement(statement) => {
                if let Some(argument) = &statement.argument {
                    self.expression(argument);
                }
            }
            Statement::VariableDeclaration(declaration) => self.variable_declaration(declaration),
            Statement::FunctionDeclaration(function) => self.function(function),
            Statement::ExportNamedDeclaration(export) => {
                if let Some(declaration) = &export.declaration {
                    self.declaration(declaration);
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                    self.function(function);
                }
                declaration => {
                    if let Some(expression) = declaration.as_expression() {
                        self.expression(expression);
                    }
                }
            },
            _ => {}
        }
    }

    fn declaration(&mut self, declaration: &Declaration<'_>) {
        match declaration {
            Declaration::VariableDeclaration(declaration) => {
                self.variable_declaration(declaration);
            }
            Declaration::FunctionDeclaration(function) => self.function(function),
            _ => {}
        }
    }

    fn variable_declaration(&mut self, declaration: &VariableDeclaration<'_>) {
        for declarator in declaration.declarations.iter() {
            if let Some(init) = &declarator.init {
                self.expression(init);
            }
        }
    }

    fn function(&mut self, function: &Function<'_>) {
        let whitelisted = function
            .id
            .as_ref()
            .is_some_and(|id| SIDE_PROP_COMPONENTS.contains(&id.name.as_str()));
        if whitelisted {
            self.side_parameter_defaults(&function.params);
        }
        if let Some(body) = &function.body {
            for statement in body.statements.iter() {
                self.statement(statement);
            }
        }
    }

    /// `function DropdownMenuSubContent({ side = "right", ... })`: the
    /// default value is a rewrite target just like the attribute form.
    fn side_parameter_defaults(&mut self, params: &FormalParameters<'_>) {
        for param in params.items.iter() {
            let BindingPatternKind::ObjectPattern(pattern) = &param.pattern.kind else {
                continue;
            };
            for property in pattern.properties.iter() {
                if property_key_name(&property.key) != Some("side") {
                    continue;
                }
                if let BindingPatternKind::AssignmentPattern(assignment) = &property.value.kind {
                    if let Expression::StringLiteral(literal) = &assignment.right {
                        self.scan.side_values.push(literal.span);
                    }
                }
            }
        }
    }

    fn expression(&mut self, expression: &Expression<'_>) {
        match expression {
            Expression::StringLiteral(literal) => self.scan.strings.push(literal.span),
            Expression::TemplateLiteral(template) => self.template(template),
            Expression::CallExpression(call) => self.call(call),
            Expression::ArrowFunctionExpression(arrow) => {
                for statement in arrow.body.statements.iter() {
                    self.statement(statement);
                }
            }
            Expression::FunctionExpression(function) => self.function(function),
            Expression::ConditionalExpression(conditional) => {
                self.expression(&conditional.test);
                self.expression(&conditional.consequent);
                self.expression(&conditional.alternate);
            }
            Expression::LogicalExpression(logical) => {
                self.expression(&logical.left);
                self.expression(&logical.right);
            }
            Expression::BinaryExpression(binary) => {
                self.expression(&binary.left);
                self.expression(&binary.right);
            }
            Expression::ObjectExpression(object) => self.object(object),
            Expression::ArrayExpression(array) => {
                for element in array.elements.iter() {
                    match element {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            self.expression(&spread.argument);
                        }
                        ArrayExpressionElement::Elision(_) => {}
                        element => {
                            if let Some(expression) = element.as_expression() {
                                self.expression(expression);
                            }
                        }
                    }
                }
            }
            Expression::ParenthesizedExpression(inner) => self.expression(&inner.expression),
            Expression::SequenceExpression(sequence) => {
                for expression in sequence.expressions.iter() {
                    self.expression(expression);
                }
            }
            Expression::AssignmentExpression(assignment) => self.expression(&assignment.right),
            Expression::AwaitExpression(inner) => self.expression(&inner.argument),
            Expression::UnaryExpression(unary) => self.expression(&unary.argument),
            Expression::ChainExpression(chain) => {
                if let ChainElement::CallExpression(call) = &chain.expression {
                    self.call(call);
                }
            }
            Expression::NewExpression(new_expression) => self.arguments(&new_expression.arguments),
            Expression::ImportExpression(import) => self.expression(&import.source),
            Expression::StaticMemberExpression(member) => self.expression(&member.object),
            Expression::ComputedMemberExpression(member) => {
                self.expression(&member.object);
                self.expression(&member.expression);
            }
            Expression::TSAsExpression(cast) => self.expression(&cast.expression),
            Expression::TSSatisfiesExpression(cast) => self.expression(&cast.expression),
            Expression::TSNonNullExpression(cast) => self.expression(&cast.expression),
            Expression::JSXElement(element) => self.jsx_element(element),
            Expression::JSXFragment(fragment) => {
                for child in fragment.children.iter() {
                    self.jsx_child(child);
                }
            }
            _ => {}
        }
    }

    fn template(&mut self, template: &TemplateLiteral<'_>) {
        if template.expressions.is_empty() && template.quasis.len() == 1 {
            self.scan.templates.push(template.span);
            return;
        }
        for expression in template.expressions.iter() {
            self.expression(expression);
        }
    }

    fn call(&mut self, call: &CallExpression<'_>) {
        match callee_name(call) {
            Some("cn") => {
                for argument in call.arguments.iter() {
                    if let Some(expression) = argument.as_expression() {
                        self.class_argument(expression);
                    }
                }
            }
            Some("cva") => self.cva(call),
            Some("mergeProps") => self.merge_props(call),
            _ => {}
        }
        self.arguments(&call.arguments);
        self.expression(&call.callee);
    }

    fn arguments(&mut self, arguments: &[Argument<'_>]) {
        for argument in arguments.iter() {
            match argument {
                Argument::SpreadElement(spread) => self.expression(&spread.argument),
                argument => {
                    if let Some(expression) = argument.as_expression() {
                        self.expression(expression);
                    }
                }
            }
        }
    }

    /// A direct argument to the class-combining call: plain strings plus the
    /// string branches of ternary and logical expressions.
    fn class_argument(&mut self, expression: &Expression<'_>) {
        match expression {
            Expression::StringLiteral(literal) => self.scan.class_strings.push(literal.span),
            Expression::ConditionalExpression(conditional) => {
                self.class_string(&conditional.consequent);
                self.class_string(&conditional.alternate);
            }
            Expression::LogicalExpression(logical) => {
                self.class_string(&logical.left);
                self.class_string(&logical.right);
            }
            _ => {}
        }
    }

    fn class_string(&mut self, expression: &Expression<'_>) {
        if let Expression::StringLiteral(literal) = expression {
            self.scan.class_strings.push(literal.span);
        }
    }

    /// cva(base, { variants: { group: { key: "classes" } } })
    fn cva(&mut self, call: &CallExpression<'_>) {
        let mut arguments = call.arguments.iter();
        if let Some(Expression::StringLiteral(literal)) =
            arguments.next().and_then(Argument::as_expression)
        {
            self.scan.class_strings.push(literal.span);
        }
        let Some(Expression::ObjectExpression(options)) =
            arguments.next().and_then(Argument::as_expression)
        else {
            return;
        };
        for property in object_properties(options) {
            if property_key_name(&property.key) != Some("variants") {
                continue;
            }
            let Expression::ObjectExpression(groups) = &property.value else {
                continue;
            };
            for group in object_properties(groups) {
                let Expression::ObjectExpression(values) = &group.value else {
                    continue;
                };
                for value in object_properties(values) {
                    self.class_string(&value.value);
                }
            }
        }
    }

    /// mergeProps({ className: ... }, props)
    fn merge_props(&mut self, call: &CallExpression<'_>) {
        let Some(Expression::ObjectExpression(props)) =
            call.arguments.first().and_then(Argument::as_expression)
        else {
            return;
        };
        for property in object_properties(props) {
            if property_key_name(&property.key) == Some("className") {
                self.class_string(&property.value);
            }
        }
    }

    fn object(&mut self, object: &ObjectExpression<'_>) {
        for property in object.properties.iter() {
            match property {
                ObjectPropertyKind::ObjectProperty(property) => self.expression(&property.value),
                ObjectPropertyKind::SpreadProperty(spread) => self.expression(&spread.argument),
            }
        }
    }

    fn jsx_element(&mut self, element: &JSXElement<'_>) {
        self.jsx_opening(&element.opening_element);
        if let Some(closing) = &element.closing_element {
            if let Some((span, name)) = jsx_name(&closing.name) {
                self.scan.jsx_tags.push((span, name.to_string()));
            }
        }
        for child in element.children.iter() {
            self.jsx_child(child);
        }
    }

    fn jsx_opening(&mut self, opening: &JSXOpeningElement<'_>) {
        let tag = jsx_name(&opening.name);
        if let Some((span, name)) = tag {
            self.scan.jsx_tags.push((span, name.to_string()));
        }
        let side_component = tag.is_some_and(|(_, name)| SIDE_PROP_COMPONENTS.contains(&name));
        for item in opening.attributes.iter() {
            match item {
                JSXAttributeItem::Attribute(attribute) => {
                    self.jsx_attribute(attribute, side_component);
                }
                JSXAttributeItem::SpreadAttribute(spread) => self.expression(&spread.argument),
            }
        }
    }

    fn jsx_attribute(&mut self, attribute: &JSXAttribute<'_>, side_component: bool) {
        let name = match &attribute.name {
            JSXAttributeName::Identifier(identifier) => Some(identifier.name.as_str()),
            JSXAttributeName::NamespacedName(_) => None,
        };
        match &attribute.value {
            Some(JSXAttributeValue::StringLiteral(literal)) => {
                self.scan.strings.push(literal.span);
                if name == Some("className") {
                    self.scan.class_strings.push(literal.span);
                }
                if side_component && name == Some("side") {
                    self.scan.side_values.push(literal.span);
                }
            }
            Some(JSXAttributeValue::ExpressionContainer(container)) => {
                if name == Some("classNames") {
                    if let Some(expression) = container.expression.as_expression() {
                        self.class_names_object(expression);
                    }
                }
                if let Some(expression) = container.expression.as_expression() {
                    self.expression(expression);
                }
            }
            Some(JSXAttributeValue::Element(element)) => self.jsx_element(element),
            Some(JSXAttributeValue::Fragment(fragment)) => {
                for child in fragment.children.iter() {
                    self.jsx_child(child);
                }
            }
            None => {}
        }
    }

    /// classNames={{ content: "p-2", ... }}: string values keyed by slot,
    /// except the variant discriminator.
    fn class_names_object(&mut self, expression: &Expression<'_>) {
        let Expression::ObjectExpression(object) = expression else {
            return;
        };
        for property in object_properties(object) {
            if property_key_name(&property.key) == Some("variant") {
                continue;
            }
            match &property.value {
                Expression::StringLiteral(literal) => {
                    self.scan.class_strings.push(literal.span);
                }
                Expression::ObjectExpression(_) => self.class_names_object(&property.value),
                _ => {}
            }
        }
    }

    fn jsx_child(&mut self, child: &JSXChild<'_>) {
        match child {
            JSXChild::Element(element) => self.jsx_element(element),
            JSXChild::Fragment(fragment) => {
                for child in fragment.children.iter() {
                    self.jsx_child(child);
                }
            }
            JSXChild::ExpressionContainer(container) => {
                if let Some(expression) = container.expression.as_expression() {
                    self.expression(expression);
                }
            }
            JSXChild::Text(_) | JSXChild::Spread(_) => {}
        }
    }
}

fn callee_name<'a>(call: &'a CallExpression<'_>) -> Option<&'a str> {
    match &call.callee {
        Expression::Identifier(identifier) => Some(identifier.name.as_str()),
        _ => None,
    }
}

fn object_properties<'a, 'b>(
    object: &'a ObjectExpression<'b>,
) -> impl Iterator<Item = &'a ObjectProperty<'b>> {
    object
        .properties
        .iter()
        .filter_map(|property| match property {
            ObjectPropertyKind::ObjectProperty(property) => Some(&**property),
            ObjectPropertyKind::SpreadProperty(_) => None,
        })
}

fn property_key_name<'a>(key: &'a PropertyKey<'_>) -> Option<&'a str> {
    match key {
        PropertyKey::StaticIdentifier(identifier) => Some(identifier.name.as_str()),
        PropertyKey::StringLiteral(literal) => Some(literal.value.as_str()),
        _ => None,
    }
}

fn jsx_name<'a>(name: &'a JSXElementName<'a>) -> Option<(Span, &'a str)> {
    match name {
        JSXElementName::Identifier(identifier) => {
            Some((identifier.span, identifier.name.as_str()))
        }
        JSXElementName::IdentifierReference(identifier) => {
            Some((identifier.span, identifier.name.as_str()))
        }
        _ => None,
    }
}
